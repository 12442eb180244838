//! SQLite implementation of the MessageRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::{parse_datetime, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{MessageHandle, MessageRole};
use crate::domain::ports::MessageRepository;

#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: String,
    chat_id: String,
    message_id: i64,
    role: String,
    alert_group_id: String,
    created_at: String,
}

impl TryFrom<MessageRow> for MessageHandle {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> DomainResult<Self> {
        let role = MessageRole::from_str(&row.role).ok_or_else(|| {
            DomainError::SerializationError(format!("Unknown message role: {}", row.role))
        })?;
        Ok(Self {
            id: parse_uuid(&row.id)?,
            chat_id: row.chat_id,
            message_id: row.message_id,
            role,
            alert_group_id: parse_uuid(&row.alert_group_id)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

const MESSAGE_COLUMNS: &str = "id, chat_id, message_id, role, alert_group_id, created_at";

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn find_messages(
        &self,
        alert_group_id: Uuid,
        roles: &[MessageRole],
    ) -> DomainResult<Vec<MessageHandle>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; roles.len()].join(", ");
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE alert_group_id = ? AND role IN ({placeholders}) ORDER BY seq"
        );

        let mut query = sqlx::query_as::<_, MessageRow>(&sql).bind(alert_group_id.to_string());
        for role in roles {
            query = query.bind(role.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter().map(MessageHandle::try_from).collect()
    }

    async fn get_message(&self, id: Uuid) -> DomainResult<Option<MessageHandle>> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?");
        let row: Option<MessageRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(MessageHandle::try_from).transpose()
    }

    async fn insert_message(&self, message: &MessageHandle) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO messages (id, chat_id, message_id, role, alert_group_id, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(&message.chat_id)
        .bind(message.message_id)
        .bind(message.role.as_str())
        .bind(message.alert_group_id.to_string())
        .bind(message.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteAlertGroupRepository};
    use crate::domain::models::AlertGroup;

    async fn setup() -> (SqliteMessageRepository, AlertGroup) {
        let pool = create_migrated_test_pool().await.unwrap();
        let group = AlertGroup::new(Uuid::new_v4(), "Disk full");
        SqliteAlertGroupRepository::new(pool.clone())
            .save_alert_group(&group)
            .await
            .unwrap();
        (SqliteMessageRepository::new(pool), group)
    }

    #[tokio::test]
    async fn test_find_messages_filters_roles_in_creation_order() {
        let (repo, group) = setup().await;
        let personal = MessageHandle::new(group.id, MessageRole::PersonalCopy, "42", 7);
        let summary = MessageHandle::new(group.id, MessageRole::GroupSummary, "-100", 1);
        let log = MessageHandle::new(group.id, MessageRole::ActivityLog, "-100", 2);
        for message in [&personal, &summary, &log] {
            repo.insert_message(message).await.unwrap();
        }

        let found = repo
            .find_messages(group.id, &MessageRole::ACTION_ROLES)
            .await
            .unwrap();
        assert_eq!(found, vec![personal.clone(), summary]);

        let found = repo
            .find_messages(group.id, &MessageRole::LOG_REPORT_ROLES)
            .await
            .unwrap();
        assert_eq!(found, vec![personal, log]);
    }

    #[tokio::test]
    async fn test_find_messages_with_no_roles() {
        let (repo, group) = setup().await;
        repo.insert_message(&MessageHandle::new(group.id, MessageRole::GroupSummary, "-100", 1))
            .await
            .unwrap();
        assert!(repo.find_messages(group.id, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_message() {
        let (repo, group) = setup().await;
        let message = MessageHandle::new(group.id, MessageRole::ActionStrip, "-100", 3);
        repo.insert_message(&message).await.unwrap();

        assert_eq!(repo.get_message(message.id).await.unwrap(), Some(message));
        assert!(repo.get_message(Uuid::new_v4()).await.unwrap().is_none());
    }
}
