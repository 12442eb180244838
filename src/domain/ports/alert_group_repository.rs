//! Repository port for alert groups, their alerts and log records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Alert, AlertGroup, LogRecord};

/// Read access to the alert group aggregate.
#[async_trait]
pub trait AlertGroupRepository: Send + Sync {
    /// Get an alert group by ID.
    async fn get_alert_group(&self, id: Uuid) -> DomainResult<Option<AlertGroup>>;

    /// Get a log record by ID.
    async fn get_log_record(&self, id: Uuid) -> DomainResult<Option<LogRecord>>;

    /// Get an alert by ID.
    async fn get_alert(&self, id: Uuid) -> DomainResult<Option<Alert>>;

    /// List log records of a group, oldest first.
    async fn list_log_records(&self, alert_group_id: Uuid) -> DomainResult<Vec<LogRecord>>;
}
