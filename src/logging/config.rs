use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Settings for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub environment: String,
    pub level: LogLevel,
    /// Directory for the rolling `app.log` and `error.log` files.
    pub directory: PathBuf,
    /// JSON output for files and console.
    pub json: bool,
}

impl LoggingConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        let default_level = if config.is_production() {
            LogLevel::Info
        } else {
            LogLevel::Debug
        };
        let level = config
            .log_level
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default_level);

        Self {
            environment: config.environment.clone(),
            level,
            directory: PathBuf::from("logs"),
            json: config.is_production(),
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        format!(
            "portfolio_renderer={},tower_http=debug,axum=debug",
            self.level
        )
    }
}
