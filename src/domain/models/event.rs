//! Typed events delivered to the representative.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::alert_group::{Alert, AlertGroup, LogRecord, LogRecordType};

/// Either a loaded entity or the identifier it can be loaded by.
///
/// Publishers that already hold the entity send it along; publishers that
/// only know the id (e.g. right after a write that may not be committed yet)
/// send the id and let the receiver resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ref", content = "value", rename_all = "snake_case")]
pub enum EntityRef<T> {
    Loaded(T),
    Id(Uuid),
}

impl<T> From<T> for EntityRef<T> {
    fn from(entity: T) -> Self {
        Self::Loaded(entity)
    }
}

/// A log record together with the alert group it was recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub log_record: LogRecord,
    pub alert_group: AlertGroup,
}

impl LifecycleEvent {
    pub fn new(log_record: LogRecord, alert_group: AlertGroup) -> Self {
        Self {
            log_record,
            alert_group,
        }
    }

    pub fn kind(&self) -> LogRecordType {
        self.log_record.kind
    }
}

/// Everything the representative reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RepresentativeEvent {
    /// An alert group action was recorded (ack, resolve, silence, ...).
    /// An id refers to the log record.
    Action(EntityRef<LifecycleEvent>),
    /// The activity log of an alert group changed.
    LogUpdated(EntityRef<AlertGroup>),
    /// A new alert arrived.
    AlertCreated(EntityRef<Alert>),
}

impl RepresentativeEvent {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::LogUpdated(_) => "log_updated",
            Self::AlertCreated(_) => "alert_created",
        }
    }
}
