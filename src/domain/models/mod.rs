pub mod alert_group;
pub mod config;
pub mod connector;
pub mod event;
pub mod heartbeat;
pub mod job;
pub mod message;

pub use alert_group::{Alert, AlertGroup, LogRecord, LogRecordType};
pub use config::{
    Config, DatabaseConfig, LoggingConfig, RetryConfig, SchedulerConfig, TelegramConfig,
};
pub use connector::{ConnectorOwner, ConnectorRecord};
pub use event::{EntityRef, LifecycleEvent, RepresentativeEvent};
pub use heartbeat::{
    HeartbeatAnnotations, HeartbeatLabels, HeartbeatPayload, HeartbeatPayloads, HeartbeatStatus,
    HeartbeatTexts,
};
pub use job::Job;
pub use message::{MessageHandle, MessageRole};
