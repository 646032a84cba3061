//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Bookly bot.

use std::path::Path;
use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{BooklyError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| BooklyError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(file_path) if !file_path.is_empty() => {
            let path = Path::new(file_path);
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "bookly-bot.log".into());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| BooklyError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: u64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log the outcome of a single notification delivery
pub fn log_notification(kind: &str, chat_id: i64, delivered: bool, error: Option<&str>) {
    if delivered {
        info!(kind = kind, chat_id = chat_id, "Notification sent");
    } else {
        warn!(kind = kind, chat_id = chat_id, error = error, "Notification failed");
    }
}

/// Log a finished scheduled job
pub fn log_job_run(job_id: &str, candidates: usize, sent: usize, failed: usize, duration_ms: u64) {
    info!(
        job = job_id,
        candidates = candidates,
        sent = sent,
        failed = failed,
        duration_ms = duration_ms,
        "Scheduled job finished"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, rows: usize, duration_ms: u64) {
    debug!(
        operation = operation,
        rows = rows,
        duration_ms = duration_ms,
        "Database operation completed"
    );
}
