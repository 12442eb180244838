//! Port for handing jobs to the asynchronous worker layer.

use thiserror::Error;

use crate::domain::models::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Job queue is full")]
    Full,

    #[error("Job queue is closed")]
    Closed,
}

/// Non-blocking job submission.
///
/// `enqueue` must return immediately; it either accepts the job or reports
/// why it could not.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, job: Job) -> Result<(), QueueError>;
}
