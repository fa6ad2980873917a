//! Logging initialization using tracing.

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Initialized logging pipeline.
///
/// Holds the appender guard so buffered file output survives until exit.
pub struct Logging {
    _guard: Option<WorkerGuard>,
}

impl Logging {
    /// Initialize the global subscriber from configuration.
    ///
    /// Console output honors the configured format; when a log directory is
    /// set, a daily-rolling JSON file layer is added for structured
    /// post-hoc analysis.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let guard = if let Some(ref log_dir) = config.log_dir {
            let file_appender = rolling::daily(log_dir, "leadgate.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true);

            match config.format.as_str() {
                "json" => {
                    let stderr_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr);
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(file_layer)
                        .with(stderr_layer)
                        .try_init()
                        .map_err(|e| anyhow!("failed to init logging: {e}"))?;
                }
                _ => {
                    let stderr_layer =
                        tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(file_layer)
                        .with(stderr_layer)
                        .try_init()
                        .map_err(|e| anyhow!("failed to init logging: {e}"))?;
                }
            }
            Some(guard)
        } else {
            match config.format.as_str() {
                "json" => {
                    let stderr_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr);
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(stderr_layer)
                        .try_init()
                        .map_err(|e| anyhow!("failed to init logging: {e}"))?;
                }
                _ => {
                    let stderr_layer =
                        tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(stderr_layer)
                        .try_init()
                        .map_err(|e| anyhow!("failed to init logging: {e}"))?;
                }
            }
            None
        };

        Ok(Self { _guard: guard })
    }
}
