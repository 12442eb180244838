//! Port trait definitions (Hexagonal Architecture)
//!
//! The representative only talks to its collaborators through these traits:
//! - AlertGroupRepository / MessageRepository / ConnectorRepository: data access
//! - JobQueue: asynchronous work submission
//! - ChatClient: the chat platform messages are edited on
//! - HeartbeatTextSource: heartbeat title/message texts

pub mod alert_group_repository;
pub mod chat_client;
pub mod connector_repository;
pub mod heartbeat_text_source;
pub mod job_queue;
pub mod message_repository;

pub use alert_group_repository::AlertGroupRepository;
pub use chat_client::{ChatClient, ChatError};
pub use connector_repository::ConnectorRepository;
pub use heartbeat_text_source::{HeartbeatError, HeartbeatTextSource};
pub use job_queue::{JobQueue, QueueError};
pub use message_repository::MessageRepository;
