//! Port for the texts heartbeat payloads are rendered from.

use thiserror::Error;

use crate::domain::models::HeartbeatTexts;

#[derive(Debug, Error)]
pub enum HeartbeatError {
    #[error("Unknown heartbeat integration: {0:?}")]
    UnknownIntegration(String),
}

pub trait HeartbeatTextSource: Send + Sync {
    fn heartbeat_texts(&self, integration: &str) -> Result<HeartbeatTexts, HeartbeatError>;
}
