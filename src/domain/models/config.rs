use serde::{Deserialize, Serialize};

/// Main configuration structure for telegraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Job queue and worker pool configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Retry policy for dispatch and delivery
    #[serde(default)]
    pub retry: RetryConfig,

    /// Telegram bot API configuration
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".telegraph/telegraph.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Job queue and worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Capacity of the bounded job queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Number of concurrent job workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Events buffered per event bus subscriber before publishers wait
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

const fn default_queue_capacity() -> usize {
    1024
}

const fn default_workers() -> usize {
    4
}

const fn default_event_bus_capacity() -> usize {
    256
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            workers: default_workers(),
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

/// Exponential backoff used when dispatch or delivery fails transiently
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff between attempts in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Give up after this much total time in milliseconds
    #[serde(default = "default_max_elapsed_ms")]
    pub max_elapsed_ms: u64,
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

const fn default_max_elapsed_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            max_elapsed_ms: default_max_elapsed_ms(),
        }
    }
}

/// Telegram bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TelegramConfig {
    /// Base URL of the bot API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bot token; usually supplied through `TELEGRAPH_TELEGRAM__BOT_TOKEN`
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Outgoing request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_requests_per_second() -> u32 {
    25
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            bot_token: None,
            requests_per_second: default_requests_per_second(),
        }
    }
}
