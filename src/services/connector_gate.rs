//! Decides whether a tenant has an active chat channel.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::ports::ConnectorRepository;

/// Answers "is this tenant's messaging channel active?".
///
/// A tenant connector only counts once it is configured, while a single user
/// connector of the tenant counts by its presence alone. The asymmetry is
/// product policy and must stay as is.
#[derive(Clone)]
pub struct ConnectorGate {
    connectors: Arc<dyn ConnectorRepository>,
}

impl ConnectorGate {
    pub fn new(connectors: Arc<dyn ConnectorRepository>) -> Self {
        Self { connectors }
    }

    pub async fn is_channel_active(&self, tenant_id: Uuid) -> DomainResult<bool> {
        let tenant_configured = self
            .connectors
            .get_tenant_connector(tenant_id)
            .await?
            .is_some_and(|connector| connector.is_configured);

        if tenant_configured {
            return Ok(true);
        }

        let user_connected = self.connectors.any_user_connector(tenant_id).await?;
        tracing::trace!(%tenant_id, user_connected, "tenant connector not configured");
        Ok(user_connected)
    }

    /// Chat that new alert messages of the tenant are posted to. Only a
    /// configured tenant connector with a chat provides one; user connectors
    /// never do.
    pub async fn tenant_chat_id(&self, tenant_id: Uuid) -> DomainResult<Option<String>> {
        Ok(self
            .connectors
            .get_tenant_connector(tenant_id)
            .await?
            .filter(|connector| connector.is_configured)
            .and_then(|connector| connector.chat_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::ConnectorRecord;

    async fn gate_with(connectors: Vec<ConnectorRecord>) -> ConnectorGate {
        let store = Arc::new(InMemoryStore::new());
        for connector in connectors {
            store.put_connector(connector).await;
        }
        ConnectorGate::new(store)
    }

    #[tokio::test]
    async fn test_no_connectors_is_inactive() {
        let gate = gate_with(vec![]).await;
        assert!(!gate.is_channel_active(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_unconfigured_tenant_connector_is_inactive() {
        let tenant = Uuid::new_v4();
        let gate = gate_with(vec![ConnectorRecord::tenant(tenant, false)]).await;
        assert!(!gate.is_channel_active(tenant).await.unwrap());
    }

    #[tokio::test]
    async fn test_configured_tenant_connector_is_active() {
        let tenant = Uuid::new_v4();
        let gate = gate_with(vec![ConnectorRecord::tenant(tenant, true)]).await;
        assert!(gate.is_channel_active(tenant).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_connector_presence_is_enough() {
        let tenant = Uuid::new_v4();
        let gate = gate_with(vec![
            ConnectorRecord::tenant(tenant, false),
            ConnectorRecord::user(Uuid::new_v4(), tenant),
        ])
        .await;
        assert!(gate.is_channel_active(tenant).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_tenants_connectors_do_not_count() {
        let tenant = Uuid::new_v4();
        let other = Uuid::new_v4();
        let gate = gate_with(vec![
            ConnectorRecord::tenant(other, true),
            ConnectorRecord::user(Uuid::new_v4(), other),
        ])
        .await;
        assert!(!gate.is_channel_active(tenant).await.unwrap());
    }

    #[tokio::test]
    async fn test_tenant_chat_id_needs_configured_tenant_connector() {
        let tenant = Uuid::new_v4();
        let gate = gate_with(vec![
            ConnectorRecord::tenant(tenant, false).with_chat_id("-100"),
            ConnectorRecord::user(Uuid::new_v4(), tenant).with_chat_id("42"),
        ])
        .await;
        assert!(gate.is_channel_active(tenant).await.unwrap());
        assert_eq!(gate.tenant_chat_id(tenant).await.unwrap(), None);

        let other = Uuid::new_v4();
        let gate = gate_with(vec![ConnectorRecord::tenant(other, true).with_chat_id("-100")]).await;
        assert_eq!(gate.tenant_chat_id(other).await.unwrap().as_deref(), Some("-100"));
    }
}
