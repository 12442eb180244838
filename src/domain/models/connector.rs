//! Records linking a tenant or a user to an external chat account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a connector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ConnectorOwner {
    Tenant(Uuid),
    User { user_id: Uuid, tenant_id: Uuid },
}

/// Link between a tenant or user and a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRecord {
    pub owner: ConnectorOwner,
    /// Only meaningful for tenant connectors; user connectors count by presence.
    pub is_configured: bool,
    /// Channel or private chat new messages are posted to.
    pub chat_id: Option<String>,
}

impl ConnectorRecord {
    pub fn tenant(tenant_id: Uuid, is_configured: bool) -> Self {
        Self {
            owner: ConnectorOwner::Tenant(tenant_id),
            is_configured,
            chat_id: None,
        }
    }

    pub fn user(user_id: Uuid, tenant_id: Uuid) -> Self {
        Self {
            owner: ConnectorOwner::User { user_id, tenant_id },
            is_configured: false,
            chat_id: None,
        }
    }

    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    pub fn tenant_id(&self) -> Uuid {
        match self.owner {
            ConnectorOwner::Tenant(id) | ConnectorOwner::User { tenant_id: id, .. } => id,
        }
    }
}
