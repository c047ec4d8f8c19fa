/*!
 * Logging Module
 * Centralized logging configuration and utilities
 */
pub mod config;
pub mod middleware;

pub use config::{LogLevel, LoggingConfig};

use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Writer guards; dropping them stops the background writers and loses
/// buffered lines, so hold them for the life of the process.
#[must_use]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Initialize the logging system
pub fn init(config: &LoggingConfig) -> LogGuards {
    std::fs::create_dir_all(&config.directory).ok();

    // File appender for all logs
    let file_appender = rolling::daily(&config.directory, "app.log");
    let (file_writer, file_guard) = non_blocking(file_appender);

    // File appender for errors only
    let error_appender = rolling::daily(&config.directory, "error.log");
    let (error_writer, error_guard) = non_blocking(error_appender);

    let (console_writer, console_guard) = non_blocking(io::stdout());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let error_filter = tracing_subscriber::filter::LevelFilter::ERROR;

    if config.json {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(error_filter);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let error_layer = fmt::layer()
            .with_writer(error_writer)
            .with_ansi(false)
            .with_filter(error_filter);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    }

    tracing::info!(
        environment = %config.environment,
        level = %config.level,
        "logging initialized"
    );

    LogGuards {
        _guards: vec![file_guard, error_guard, console_guard],
    }
}
