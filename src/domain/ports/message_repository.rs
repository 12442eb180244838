//! Repository port for posted chat messages.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{MessageHandle, MessageRole};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Messages of a group whose role is in `roles`, in creation order.
    async fn find_messages(
        &self,
        alert_group_id: Uuid,
        roles: &[MessageRole],
    ) -> DomainResult<Vec<MessageHandle>>;

    /// Get a message handle by ID.
    async fn get_message(&self, id: Uuid) -> DomainResult<Option<MessageHandle>>;

    /// Record a newly posted message.
    async fn insert_message(&self, message: &MessageHandle) -> DomainResult<()>;
}
