//! Alert group aggregate: the group itself, its alerts and its log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of lifecycle transition recorded against an alert group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogRecordType {
    Ack,
    UnAck,
    AutoUnAck,
    Resolved,
    UnResolved,
    AckReminderTriggered,
    Silence,
    UnSilence,
    Attached,
    Unattached,
    /// Group was created from its first alert
    Registered,
    /// Group was routed through a channel filter
    RouteAssigned,
    EscalationTriggered,
    Restricted,
}

impl LogRecordType {
    /// Every known lifecycle kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Ack,
        Self::UnAck,
        Self::AutoUnAck,
        Self::Resolved,
        Self::UnResolved,
        Self::AckReminderTriggered,
        Self::Silence,
        Self::UnSilence,
        Self::Attached,
        Self::Unattached,
        Self::Registered,
        Self::RouteAssigned,
        Self::EscalationTriggered,
        Self::Restricted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ack => "ack",
            Self::UnAck => "un_ack",
            Self::AutoUnAck => "auto_un_ack",
            Self::Resolved => "resolved",
            Self::UnResolved => "un_resolved",
            Self::AckReminderTriggered => "ack_reminder_triggered",
            Self::Silence => "silence",
            Self::UnSilence => "un_silence",
            Self::Attached => "attached",
            Self::Unattached => "unattached",
            Self::Registered => "registered",
            Self::RouteAssigned => "route_assigned",
            Self::EscalationTriggered => "escalation_triggered",
            Self::Restricted => "restricted",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
    }

    /// Human readable verb used in activity logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Ack => "acknowledged",
            Self::UnAck => "unacknowledged",
            Self::AutoUnAck => "automatically unacknowledged",
            Self::Resolved => "resolved",
            Self::UnResolved => "unresolved",
            Self::AckReminderTriggered => "acknowledge reminder sent",
            Self::Silence => "silenced",
            Self::UnSilence => "unsilenced",
            Self::Attached => "attached to another group",
            Self::Unattached => "unattached",
            Self::Registered => "registered",
            Self::RouteAssigned => "routed",
            Self::EscalationTriggered => "escalation triggered",
            Self::Restricted => "restricted",
        }
    }
}

impl std::fmt::Display for LogRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of related alerts sharing one lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertGroup {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    /// Derived from the channel filter that routed the group.
    pub notify_in_channel_enabled: bool,
    pub acknowledged: bool,
    pub resolved: bool,
    pub silenced: bool,
    /// Set when the group is attached to another (root) group.
    pub root_alert_group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl AlertGroup {
    pub fn new(tenant_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            title: title.into(),
            notify_in_channel_enabled: true,
            acknowledged: false,
            resolved: false,
            silenced: false,
            root_alert_group_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_notify_in_channel(mut self, enabled: bool) -> Self {
        self.notify_in_channel_enabled = enabled;
        self
    }

    /// Short status label shown next to the group title.
    pub fn status_label(&self) -> &'static str {
        if self.resolved {
            "Resolved"
        } else if self.acknowledged {
            "Acknowledged"
        } else if self.silenced {
            "Silenced"
        } else {
            "Firing"
        }
    }

    pub fn is_attached(&self) -> bool {
        self.root_alert_group_id.is_some()
    }
}

/// A single alert belonging to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub alert_group_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(alert_group_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            alert_group_id,
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

/// An immutable lifecycle event recorded against an alert group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Uuid,
    pub kind: LogRecordType,
    pub alert_group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(alert_group_id: Uuid, kind: LogRecordType) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            alert_group_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_type_str_roundtrip() {
        for kind in LogRecordType::ALL {
            assert_eq!(LogRecordType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(LogRecordType::from_str("ACK"), Some(LogRecordType::Ack));
        assert_eq!(LogRecordType::from_str("wiped"), None);
    }

    #[test]
    fn test_status_label_precedence() {
        let mut group = AlertGroup::new(Uuid::new_v4(), "disk full");
        assert_eq!(group.status_label(), "Firing");
        group.silenced = true;
        assert_eq!(group.status_label(), "Silenced");
        group.acknowledged = true;
        assert_eq!(group.status_label(), "Acknowledged");
        group.resolved = true;
        assert_eq!(group.status_label(), "Resolved");
    }
}
