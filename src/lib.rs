//! Telegraph - chat representative for alert groups
//!
//! Keeps messages posted to a chat platform in sync with the lifecycle of the
//! alert groups they describe. Lifecycle events are turned into edit jobs for
//! the affected messages; a worker pool re-renders and edits them.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the ports services depend on
//! - **Service Layer** (`services`): the representative, scheduling and delivery
//! - **Adapters** (`adapters`): SQLite, in-memory and Telegram implementations of the ports
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Alert, AlertGroup, Config, ConnectorRecord, EntityRef, Job, LifecycleEvent, LogRecord,
    LogRecordType, MessageHandle, MessageRole, RepresentativeEvent,
};
pub use domain::ports::{
    AlertGroupRepository, ChatClient, ConnectorRepository, JobQueue, MessageRepository,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DispatchError, DispatchOutcome, EventBus, Representative};
