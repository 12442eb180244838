//! Units of asynchronous work handed to the job workers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deferred delivery job.
///
/// Jobs carry identifiers only. Workers re-read the current state when the
/// job runs, so a job scheduled twice renders the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Job {
    /// Re-render and edit an existing message in place.
    EditMessage { message_id: Uuid },
    /// Build and post the representation of a newly created alert.
    PostAlert { alert_id: Uuid },
}

impl Job {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EditMessage { .. } => "edit_message",
            Self::PostAlert { .. } => "post_alert",
        }
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditMessage { message_id } => write!(f, "edit_message({message_id})"),
            Self::PostAlert { alert_id } => write!(f, "post_alert({alert_id})"),
        }
    }
}
