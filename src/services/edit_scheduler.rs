//! Hands message edits and alert posts to the job queue.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::models::{Job, MessageHandle};
use crate::domain::ports::{JobQueue, QueueError};

/// Enqueues exactly one job per call without waiting for it to run.
#[derive(Clone)]
pub struct EditScheduler {
    queue: Arc<dyn JobQueue>,
}

impl EditScheduler {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    pub fn schedule_edit(&self, message: &MessageHandle) -> Result<(), QueueError> {
        let job = Job::EditMessage {
            message_id: message.id,
        };
        self.submit(job)
    }

    /// Schedule an edit for each message, stopping at the first rejection.
    ///
    /// Jobs enqueued before a rejection stay enqueued.
    pub fn schedule_edits(&self, messages: &[MessageHandle]) -> Result<usize, QueueError> {
        for message in messages {
            self.schedule_edit(message)?;
        }
        Ok(messages.len())
    }

    /// Schedule building and posting the representation of a new alert.
    pub fn schedule_post(&self, alert_id: Uuid) -> Result<(), QueueError> {
        self.submit(Job::PostAlert { alert_id })
    }

    fn submit(&self, job: Job) -> Result<(), QueueError> {
        match self.queue.enqueue(job) {
            Ok(()) => {
                tracing::debug!(%job, "job scheduled");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%job, error = %e, "failed to schedule job");
                Err(e)
            }
        }
    }
}
