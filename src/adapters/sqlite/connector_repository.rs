//! SQLite implementation of the ConnectorRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ConnectorOwner, ConnectorRecord};
use crate::domain::ports::ConnectorRepository;

#[derive(Clone)]
pub struct SqliteConnectorRepository {
    pool: SqlitePool,
}

impl SqliteConnectorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a connector. Tenant connectors are upserted; a user keeps one connector.
    pub async fn save_connector(&self, connector: &ConnectorRecord) -> DomainResult<()> {
        match connector.owner {
            ConnectorOwner::Tenant(tenant_id) => {
                sqlx::query(
                    r#"INSERT INTO tenant_connectors (tenant_id, is_configured, chat_id)
                       VALUES (?, ?, ?)
                       ON CONFLICT(tenant_id) DO UPDATE SET
                         is_configured = excluded.is_configured,
                         chat_id = excluded.chat_id"#,
                )
                .bind(tenant_id.to_string())
                .bind(connector.is_configured)
                .bind(&connector.chat_id)
                .execute(&self.pool)
                .await?;
            }
            ConnectorOwner::User { user_id, tenant_id } => {
                sqlx::query(
                    r#"INSERT INTO user_connectors (user_id, tenant_id, chat_id)
                       VALUES (?, ?, ?)
                       ON CONFLICT(user_id) DO UPDATE SET
                         tenant_id = excluded.tenant_id,
                         chat_id = excluded.chat_id"#,
                )
                .bind(user_id.to_string())
                .bind(tenant_id.to_string())
                .bind(&connector.chat_id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TenantConnectorRow {
    is_configured: bool,
    chat_id: Option<String>,
}

#[async_trait]
impl ConnectorRepository for SqliteConnectorRepository {
    async fn get_tenant_connector(&self, tenant_id: Uuid) -> DomainResult<Option<ConnectorRecord>> {
        let row: Option<TenantConnectorRow> = sqlx::query_as(
            "SELECT is_configured, chat_id FROM tenant_connectors WHERE tenant_id = ?",
        )
        .bind(tenant_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ConnectorRecord {
            owner: ConnectorOwner::Tenant(tenant_id),
            is_configured: row.is_configured,
            chat_id: row.chat_id,
        }))
    }

    async fn any_user_connector(&self, tenant_id: Uuid) -> DomainResult<bool> {
        let (exists,): (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_connectors WHERE tenant_id = ?)",
        )
        .bind(tenant_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }
}
