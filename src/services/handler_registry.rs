//! Static mapping from lifecycle event kinds to representative handlers.

use crate::domain::models::LogRecordType;

/// Logical name of a representative handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerName {
    /// Refresh every message that shows the state of the group.
    AlertGroupAction,
}

impl HandlerName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlertGroupAction => "alert_group_action",
        }
    }
}

impl std::fmt::Display for HandlerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed table of which event kinds the representative handles.
///
/// All action kinds share one handler: each of them only needs the existing
/// messages refreshed, never a distinct payload.
pub struct HandlerRegistry;

impl HandlerRegistry {
    pub const fn resolve(kind: LogRecordType) -> Option<HandlerName> {
        match kind {
            LogRecordType::Ack
            | LogRecordType::UnAck
            | LogRecordType::AutoUnAck
            | LogRecordType::Resolved
            | LogRecordType::UnResolved
            | LogRecordType::AckReminderTriggered
            | LogRecordType::Silence
            | LogRecordType::UnSilence
            | LogRecordType::Attached
            | LogRecordType::Unattached => Some(HandlerName::AlertGroupAction),
            LogRecordType::Registered
            | LogRecordType::RouteAssigned
            | LogRecordType::EscalationTriggered
            | LogRecordType::Restricted => None,
        }
    }

    pub fn handles(kind: LogRecordType) -> bool {
        Self::resolve(kind).is_some()
    }

    /// Every kind with a registered handler.
    pub fn kinds() -> impl Iterator<Item = LogRecordType> {
        LogRecordType::ALL.into_iter().filter(|kind| Self::handles(*kind))
    }
}
