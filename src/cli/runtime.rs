//! Wiring of the SQLite adapters, the chat client and the services.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tokio::sync::mpsc;

use crate::adapters::sqlite::{
    database_url, initialize_database, PoolConfig, SqliteAlertGroupRepository,
    SqliteConnectorRepository, SqliteMessageRepository,
};
use crate::adapters::telegram::TelegramChatClient;
use crate::domain::models::{Config, Job};
use crate::domain::ports::ChatClient;
use crate::services::{ChannelJobQueue, JobExecutor, Representative};

/// Everything a command needs to dispatch events and run jobs.
///
/// The representative owns the only job queue sender; dropping it lets the
/// workers drain the queue and stop.
pub struct Runtime {
    pub representative: Representative,
    pub executor: Arc<JobExecutor>,
    pub jobs: mpsc::Receiver<Job>,
}

impl Runtime {
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = initialize_database(
            &database_url(&config.database.path),
            Some(PoolConfig::from(&config.database)),
        )
        .await
        .context("Failed to open database")?;

        let chat = Arc::new(TelegramChatClient::from_config(&config.telegram));
        Ok(Self::with_pool(pool, chat, config))
    }

    pub fn with_pool(pool: SqlitePool, chat: Arc<dyn ChatClient>, config: &Config) -> Self {
        let alert_groups = Arc::new(SqliteAlertGroupRepository::new(pool.clone()));
        let messages = Arc::new(SqliteMessageRepository::new(pool.clone()));
        let connectors = Arc::new(SqliteConnectorRepository::new(pool));
        let (queue, jobs) = ChannelJobQueue::new(config.scheduler.queue_capacity);

        let representative = Representative::new(
            alert_groups.clone(),
            messages.clone(),
            connectors.clone(),
            Arc::new(queue),
        );
        let executor = Arc::new(JobExecutor::new(
            alert_groups,
            messages,
            connectors,
            chat,
            config.retry.clone(),
        ));

        Self {
            representative,
            executor,
            jobs,
        }
    }
}
