//! Handles to messages previously posted in a chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Semantic role a posted message plays for its alert group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Main message describing the group in the channel
    GroupSummary,
    /// Message carrying the ack/resolve/silence buttons
    ActionStrip,
    /// Copy sent to a user in a private chat
    PersonalCopy,
    /// Threaded activity log of the group
    ActivityLog,
}

impl MessageRole {
    /// Roles refreshed when an alert group action happens.
    pub const ACTION_ROLES: [Self; 3] = [Self::GroupSummary, Self::ActionStrip, Self::PersonalCopy];

    /// Roles refreshed when the activity log of a group changes.
    pub const LOG_REPORT_ROLES: [Self; 2] = [Self::ActivityLog, Self::PersonalCopy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupSummary => "group_summary",
            Self::ActionStrip => "action_strip",
            Self::PersonalCopy => "personal_copy",
            Self::ActivityLog => "activity_log",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "group_summary" => Some(Self::GroupSummary),
            "action_strip" => Some(Self::ActionStrip),
            "personal_copy" => Some(Self::PersonalCopy),
            "activity_log" => Some(Self::ActivityLog),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message that was posted to a chat and may later be edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    pub id: Uuid,
    /// Chat the message lives in
    pub chat_id: String,
    /// Platform-assigned message id inside the chat
    pub message_id: i64,
    pub role: MessageRole,
    pub alert_group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl MessageHandle {
    pub fn new(
        alert_group_id: Uuid,
        role: MessageRole,
        chat_id: impl Into<String>,
        message_id: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_id: chat_id.into(),
            message_id,
            role,
            alert_group_id,
            created_at: Utc::now(),
        }
    }
}
