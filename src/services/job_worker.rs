//! Job queue and the worker pool that executes delivery jobs.
//!
//! Jobs only carry identifiers. Each job re-reads the message and the alert
//! group when it runs, so duplicate or reordered jobs converge on the same
//! final message content.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::connector_gate::ConnectorGate;
use super::message_renderer::render_message;
use super::retry::backoff_policy;
use crate::domain::errors::DomainError;
use crate::domain::models::{Job, MessageHandle, MessageRole, RetryConfig};
use crate::domain::ports::{
    AlertGroupRepository, ChatClient, ChatError, ConnectorRepository, JobQueue, MessageRepository,
    QueueError,
};

/// Bounded in-process job queue backed by a tokio channel.
#[derive(Clone)]
pub struct ChannelJobQueue {
    sender: mpsc::Sender<Job>,
}

impl ChannelJobQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Job>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl JobQueue for ChannelJobQueue {
    fn enqueue(&self, job: Job) -> Result<(), QueueError> {
        self.sender.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
}

/// Executes a single job against the current state.
pub struct JobExecutor {
    alert_groups: Arc<dyn AlertGroupRepository>,
    messages: Arc<dyn MessageRepository>,
    gate: ConnectorGate,
    chat: Arc<dyn ChatClient>,
    retry: RetryConfig,
    /// Held from the summary lookup until the new summary is recorded.
    post_lock: Mutex<()>,
}

impl JobExecutor {
    pub fn new(
        alert_groups: Arc<dyn AlertGroupRepository>,
        messages: Arc<dyn MessageRepository>,
        connectors: Arc<dyn ConnectorRepository>,
        chat: Arc<dyn ChatClient>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            alert_groups,
            messages,
            gate: ConnectorGate::new(connectors),
            chat,
            retry,
            post_lock: Mutex::new(()),
        }
    }

    pub async fn execute(&self, job: Job) -> Result<(), JobError> {
        match job {
            Job::EditMessage { message_id } => self.edit_message(message_id).await,
            Job::PostAlert { alert_id } => self.post_alert(alert_id).await,
        }
    }

    async fn edit_message(&self, message_id: Uuid) -> Result<(), JobError> {
        let Some(message) = self.messages.get_message(message_id).await? else {
            tracing::warn!(%message_id, "message to edit no longer exists");
            return Ok(());
        };
        let group = self
            .alert_groups
            .get_alert_group(message.alert_group_id)
            .await?
            .ok_or(DomainError::AlertGroupNotFound(message.alert_group_id))?;
        let log_records = self.alert_groups.list_log_records(group.id).await?;
        let text = render_message(&group, message.role, &log_records);

        let chat = &self.chat;
        let (chat_id, platform_id, text) =
            (message.chat_id.as_str(), message.message_id, text.as_str());
        let result = backoff::future::retry(backoff_policy(&self.retry), || async move {
            chat.edit_message(chat_id, platform_id, text).await.map_err(classify)
        })
        .await;

        match result {
            Ok(()) | Err(ChatError::NotModified) => {
                tracing::debug!(%message_id, role = %message.role, "message edited");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn post_alert(&self, alert_id: Uuid) -> Result<(), JobError> {
        let alert = self
            .alert_groups
            .get_alert(alert_id)
            .await?
            .ok_or(DomainError::AlertNotFound(alert_id))?;
        let group = self
            .alert_groups
            .get_alert_group(alert.alert_group_id)
            .await?
            .ok_or(DomainError::AlertGroupNotFound(alert.alert_group_id))?;

        if !group.notify_in_channel_enabled {
            tracing::debug!(%alert_id, "chat notification disabled, not posting");
            return Ok(());
        }

        let Some(chat_id) = self.gate.tenant_chat_id(group.tenant_id).await? else {
            tracing::debug!(%alert_id, tenant_id = %group.tenant_id, "no configured channel to post to");
            return Ok(());
        };

        // A group is posted once; later alerts refresh what is already there.
        let _guard = self.post_lock.lock().await;
        let summaries = self
            .messages
            .find_messages(group.id, &[MessageRole::GroupSummary])
            .await?;
        if !summaries.is_empty() {
            tracing::debug!(%alert_id, alert_group_id = %group.id, "group already posted, refreshing");
            for message in self
                .messages
                .find_messages(group.id, &MessageRole::ACTION_ROLES)
                .await?
            {
                self.edit_message(message.id).await?;
            }
            return Ok(());
        }

        let text = render_message(&group, MessageRole::GroupSummary, &[]);
        let chat = &self.chat;
        let (target, text) = (chat_id.as_str(), text.as_str());
        let platform_id = backoff::future::retry(backoff_policy(&self.retry), || async move {
            chat.post_message(target, text).await.map_err(classify)
        })
        .await?;

        let handle = MessageHandle::new(group.id, MessageRole::GroupSummary, chat_id, platform_id);
        self.messages.insert_message(&handle).await?;
        tracing::info!(%alert_id, message_id = %handle.id, "alert posted");
        Ok(())
    }
}

fn classify(e: ChatError) -> backoff::Error<ChatError> {
    if e.is_transient() {
        tracing::warn!(error = %e, "transient chat error, retrying");
        backoff::Error::transient(e)
    } else {
        backoff::Error::permanent(e)
    }
}

/// Pool of workers sharing one job receiver.
pub struct JobWorkerPool;

impl JobWorkerPool {
    /// Spawn `workers` tasks. They stop once every queue sender is dropped
    /// and the queue is drained.
    pub fn spawn(
        receiver: mpsc::Receiver<Job>,
        executor: Arc<JobExecutor>,
        workers: usize,
    ) -> Vec<JoinHandle<()>> {
        let receiver = Arc::new(Mutex::new(receiver));
        (0..workers.max(1))
            .map(|worker| {
                let receiver = receiver.clone();
                let executor = executor.clone();
                tokio::spawn(async move {
                    loop {
                        let job = { receiver.lock().await.recv().await };
                        let Some(job) = job else {
                            tracing::debug!(worker, "job queue closed, worker stopping");
                            break;
                        };
                        if let Err(e) = executor.execute(job).await {
                            tracing::warn!(worker, %job, error = %e, "job failed");
                        }
                    }
                })
            })
            .collect()
    }
}
