//! Repository port for chat connectors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::ConnectorRecord;

/// Read-only queries over tenant and user connectors.
#[async_trait]
pub trait ConnectorRepository: Send + Sync {
    /// The tenant-level connector, if one exists.
    async fn get_tenant_connector(&self, tenant_id: Uuid) -> DomainResult<Option<ConnectorRecord>>;

    /// Whether any user of the tenant has a connector, configured or not.
    async fn any_user_connector(&self, tenant_id: Uuid) -> DomainResult<bool>;
}
