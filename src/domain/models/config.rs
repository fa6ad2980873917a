use serde::{Deserialize, Serialize};

/// Main configuration structure for Leadgate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Evaluator fan-out configuration.
    #[serde(default)]
    pub evaluators: EvaluatorConfig,

    /// Follow-up transport configuration.
    #[serde(default)]
    pub followup: FollowUpConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Evaluator fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluatorConfig {
    /// Base URL of the evaluator service exposing the per-signal tools.
    #[serde(default = "default_evaluator_base_url")]
    pub base_url: String,

    /// Shared timeout budget for the whole five-call batch, in seconds.
    /// Individual evaluator calls inherit it.
    #[serde(default = "default_batch_timeout_secs")]
    pub batch_timeout_secs: u64,
}

fn default_evaluator_base_url() -> String {
    "http://localhost:9000".to_string()
}

const fn default_batch_timeout_secs() -> u64 {
    40
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_evaluator_base_url(),
            batch_timeout_secs: default_batch_timeout_secs(),
        }
    }
}

/// Follow-up transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FollowUpConfig {
    /// Webhook the rendered message is posted to. Empty disables delivery
    /// (follow-ups are then skipped, not failed).
    #[serde(default)]
    pub webhook_url: String,

    /// Sender name placed in the message signature.
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Delivery timeout in seconds.
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
}

fn default_from_name() -> String {
    "Leadgate".to_string()
}

const fn default_delivery_timeout_secs() -> u64 {
    5
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            from_name: default_from_name(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".leadgate/leadgate.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for rolling daily log files.
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
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
