//! SQLite implementation of the AlertGroupRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_optional_uuid, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Alert, AlertGroup, LogRecord, LogRecordType};
use crate::domain::ports::AlertGroupRepository;

#[derive(Clone)]
pub struct SqliteAlertGroupRepository {
    pool: SqlitePool,
}

impl SqliteAlertGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a group, or overwrite its state if it already exists.
    pub async fn save_alert_group(&self, group: &AlertGroup) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO alert_groups
               (id, tenant_id, title, notify_in_channel_enabled, acknowledged, resolved,
                silenced, root_alert_group_id, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 notify_in_channel_enabled = excluded.notify_in_channel_enabled,
                 acknowledged = excluded.acknowledged,
                 resolved = excluded.resolved,
                 silenced = excluded.silenced,
                 root_alert_group_id = excluded.root_alert_group_id"#,
        )
        .bind(group.id.to_string())
        .bind(group.tenant_id.to_string())
        .bind(&group.title)
        .bind(group.notify_in_channel_enabled)
        .bind(group.acknowledged)
        .bind(group.resolved)
        .bind(group.silenced)
        .bind(group.root_alert_group_id.map(|id| id.to_string()))
        .bind(group.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_alert(&self, alert: &Alert) -> DomainResult<()> {
        sqlx::query("INSERT INTO alerts (id, alert_group_id, title, created_at) VALUES (?, ?, ?, ?)")
            .bind(alert.id.to_string())
            .bind(alert.alert_group_id.to_string())
            .bind(&alert.title)
            .bind(alert.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_log_record(&self, record: &LogRecord) -> DomainResult<()> {
        sqlx::query("INSERT INTO log_records (id, alert_group_id, kind, created_at) VALUES (?, ?, ?, ?)")
            .bind(record.id.to_string())
            .bind(record.alert_group_id.to_string())
            .bind(record.kind.as_str())
            .bind(record.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AlertGroupRow {
    id: String,
    tenant_id: String,
    title: String,
    notify_in_channel_enabled: bool,
    acknowledged: bool,
    resolved: bool,
    silenced: bool,
    root_alert_group_id: Option<String>,
    created_at: String,
}

impl TryFrom<AlertGroupRow> for AlertGroup {
    type Error = DomainError;

    fn try_from(row: AlertGroupRow) -> DomainResult<Self> {
        Ok(Self {
            id: parse_uuid(&row.id)?,
            tenant_id: parse_uuid(&row.tenant_id)?,
            title: row.title,
            notify_in_channel_enabled: row.notify_in_channel_enabled,
            acknowledged: row.acknowledged,
            resolved: row.resolved,
            silenced: row.silenced,
            root_alert_group_id: parse_optional_uuid(row.root_alert_group_id)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AlertRow {
    id: String,
    alert_group_id: String,
    title: String,
    created_at: String,
}

impl TryFrom<AlertRow> for Alert {
    type Error = DomainError;

    fn try_from(row: AlertRow) -> DomainResult<Self> {
        Ok(Self {
            id: parse_uuid(&row.id)?,
            alert_group_id: parse_uuid(&row.alert_group_id)?,
            title: row.title,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LogRecordRow {
    id: String,
    alert_group_id: String,
    kind: String,
    created_at: String,
}

impl TryFrom<LogRecordRow> for LogRecord {
    type Error = DomainError;

    fn try_from(row: LogRecordRow) -> DomainResult<Self> {
        let kind = LogRecordType::from_str(&row.kind).ok_or_else(|| {
            DomainError::SerializationError(format!("Unknown log record type: {}", row.kind))
        })?;
        Ok(Self {
            id: parse_uuid(&row.id)?,
            kind,
            alert_group_id: parse_uuid(&row.alert_group_id)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[async_trait]
impl AlertGroupRepository for SqliteAlertGroupRepository {
    async fn get_alert_group(&self, id: Uuid) -> DomainResult<Option<AlertGroup>> {
        let row: Option<AlertGroupRow> = sqlx::query_as("SELECT * FROM alert_groups WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AlertGroup::try_from).transpose()
    }

    async fn get_log_record(&self, id: Uuid) -> DomainResult<Option<LogRecord>> {
        let row: Option<LogRecordRow> = sqlx::query_as("SELECT * FROM log_records WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(LogRecord::try_from).transpose()
    }

    async fn get_alert(&self, id: Uuid) -> DomainResult<Option<Alert>> {
        let row: Option<AlertRow> = sqlx::query_as("SELECT * FROM alerts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Alert::try_from).transpose()
    }

    async fn list_log_records(&self, alert_group_id: Uuid) -> DomainResult<Vec<LogRecord>> {
        let rows: Vec<LogRecordRow> = sqlx::query_as(
            "SELECT * FROM log_records WHERE alert_group_id = ? ORDER BY created_at, rowid",
        )
        .bind(alert_group_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LogRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    #[tokio::test]
    async fn test_alert_group_roundtrip_and_update() {
        let repo = SqliteAlertGroupRepository::new(create_migrated_test_pool().await.unwrap());
        let mut group = AlertGroup::new(Uuid::new_v4(), "Queue backlog");
        repo.save_alert_group(&group).await.unwrap();

        group.acknowledged = true;
        group.notify_in_channel_enabled = false;
        repo.save_alert_group(&group).await.unwrap();

        let loaded = repo.get_alert_group(group.id).await.unwrap().unwrap();
        assert!(loaded.acknowledged);
        assert!(!loaded.notify_in_channel_enabled);
        assert_eq!(loaded.title, "Queue backlog");
        assert!(repo.get_alert_group(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_log_records_listed_in_order() {
        let repo = SqliteAlertGroupRepository::new(create_migrated_test_pool().await.unwrap());
        let group = AlertGroup::new(Uuid::new_v4(), "Queue backlog");
        repo.save_alert_group(&group).await.unwrap();

        let ack = LogRecord::new(group.id, LogRecordType::Ack);
        let resolved = LogRecord::new(group.id, LogRecordType::Resolved);
        repo.insert_log_record(&ack).await.unwrap();
        repo.insert_log_record(&resolved).await.unwrap();

        let records = repo.list_log_records(group.id).await.unwrap();
        assert_eq!(records.iter().map(|r| r.kind).collect::<Vec<_>>(), vec![
            LogRecordType::Ack,
            LogRecordType::Resolved
        ]);
        assert_eq!(repo.get_log_record(ack.id).await.unwrap(), Some(ack));
    }

    #[tokio::test]
    async fn test_alert_roundtrip() {
        let repo = SqliteAlertGroupRepository::new(create_migrated_test_pool().await.unwrap());
        let group = AlertGroup::new(Uuid::new_v4(), "Queue backlog");
        repo.save_alert_group(&group).await.unwrap();
        let alert = Alert::new(group.id, "backlog > 10k");
        repo.insert_alert(&alert).await.unwrap();

        let loaded = repo.get_alert(alert.id).await.unwrap().unwrap();
        assert_eq!(loaded.alert_group_id, group.id);
        assert_eq!(loaded.title, "backlog > 10k");
    }
}
