//! In-memory adapters, used by tests and when embedding the representative
//! without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Alert, AlertGroup, ConnectorOwner, ConnectorRecord, Job, LogRecord, MessageHandle, MessageRole,
};
use crate::domain::ports::{
    AlertGroupRepository, ConnectorRepository, JobQueue, MessageRepository, QueueError,
};

#[derive(Default)]
struct StoreState {
    alert_groups: HashMap<Uuid, AlertGroup>,
    alerts: HashMap<Uuid, Alert>,
    log_records: Vec<LogRecord>,
    messages: Vec<MessageHandle>,
    connectors: Vec<ConnectorRecord>,
}

/// In-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an alert group.
    pub async fn put_alert_group(&self, group: AlertGroup) {
        self.state.write().await.alert_groups.insert(group.id, group);
    }

    pub async fn put_alert(&self, alert: Alert) {
        self.state.write().await.alerts.insert(alert.id, alert);
    }

    pub async fn put_log_record(&self, record: LogRecord) {
        self.state.write().await.log_records.push(record);
    }

    pub async fn put_connector(&self, connector: ConnectorRecord) {
        self.state.write().await.connectors.push(connector);
    }

    pub async fn message_count(&self) -> usize {
        self.state.read().await.messages.len()
    }
}

#[async_trait]
impl AlertGroupRepository for InMemoryStore {
    async fn get_alert_group(&self, id: Uuid) -> DomainResult<Option<AlertGroup>> {
        Ok(self.state.read().await.alert_groups.get(&id).cloned())
    }

    async fn get_log_record(&self, id: Uuid) -> DomainResult<Option<LogRecord>> {
        let state = self.state.read().await;
        Ok(state.log_records.iter().find(|r| r.id == id).cloned())
    }

    async fn get_alert(&self, id: Uuid) -> DomainResult<Option<Alert>> {
        Ok(self.state.read().await.alerts.get(&id).cloned())
    }

    async fn list_log_records(&self, alert_group_id: Uuid) -> DomainResult<Vec<LogRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<_> = state
            .log_records
            .iter()
            .filter(|r| r.alert_group_id == alert_group_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn find_messages(
        &self,
        alert_group_id: Uuid,
        roles: &[MessageRole],
    ) -> DomainResult<Vec<MessageHandle>> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.alert_group_id == alert_group_id && roles.contains(&m.role))
            .cloned()
            .collect())
    }

    async fn get_message(&self, id: Uuid) -> DomainResult<Option<MessageHandle>> {
        let state = self.state.read().await;
        Ok(state.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_message(&self, message: &MessageHandle) -> DomainResult<()> {
        self.state.write().await.messages.push(message.clone());
        Ok(())
    }
}

#[async_trait]
impl ConnectorRepository for InMemoryStore {
    async fn get_tenant_connector(&self, tenant_id: Uuid) -> DomainResult<Option<ConnectorRecord>> {
        let state = self.state.read().await;
        Ok(state
            .connectors
            .iter()
            .find(|c| c.owner == ConnectorOwner::Tenant(tenant_id))
            .cloned())
    }

    async fn any_user_connector(&self, tenant_id: Uuid) -> DomainResult<bool> {
        let state = self.state.read().await;
        Ok(state.connectors.iter().any(|c| {
            matches!(c.owner, ConnectorOwner::User { tenant_id: owner_tenant, .. } if owner_tenant == tenant_id)
        }))
    }
}

/// Job queue that only records what was enqueued.
#[derive(Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<Job>>,
    capacity: Option<usize>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue that rejects jobs once `capacity` are held.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            capacity: Some(capacity),
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobQueue for InMemoryJobQueue {
    fn enqueue(&self, job: Job) -> Result<(), QueueError> {
        let mut jobs = self.jobs.lock().map_err(|_| QueueError::Closed)?;
        if self.capacity.is_some_and(|cap| jobs.len() >= cap) {
            return Err(QueueError::Full);
        }
        jobs.push(job);
        Ok(())
    }
}
