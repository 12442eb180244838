//! Selects previously posted messages of an alert group by role.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{MessageHandle, MessageRole};
use crate::domain::ports::MessageRepository;

#[derive(Clone)]
pub struct MessageSelector {
    messages: Arc<dyn MessageRepository>,
}

impl MessageSelector {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Messages of the group whose role is in `roles`, in creation order.
    ///
    /// The result is a snapshot; messages posted after the query are not seen.
    pub async fn select(
        &self,
        alert_group_id: Uuid,
        roles: &[MessageRole],
    ) -> DomainResult<Vec<MessageHandle>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }
        let selected = self.messages.find_messages(alert_group_id, roles).await?;
        tracing::debug!(
            %alert_group_id,
            ?roles,
            count = selected.len(),
            "selected messages to refresh"
        );
        Ok(selected)
    }
}
