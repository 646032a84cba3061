//! Error handling for Bookly bot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Bookly bot
#[derive(Error, Debug)]
pub enum BooklyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Bookly operations
pub type Result<T> = std::result::Result<T, BooklyError>;

impl BooklyError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BooklyError::Database(_) => ErrorSeverity::Critical,
            BooklyError::Migration(_) => ErrorSeverity::Critical,
            BooklyError::Config(_) => ErrorSeverity::Critical,
            BooklyError::ConfigLoad(_) => ErrorSeverity::Critical,
            BooklyError::InvalidInput(_) => ErrorSeverity::Info,
            BooklyError::Serialization(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Emit the error through `tracing` at the level matching its severity
    pub fn log(&self, context: &str) {
        match self.severity() {
            ErrorSeverity::Info => tracing::info!(error = %self, context = context, "Request rejected"),
            ErrorSeverity::Warning => tracing::warn!(error = %self, context = context, "Recoverable failure"),
            ErrorSeverity::Error => tracing::error!(error = %self, context = context, "Operation failed"),
            ErrorSeverity::Critical => {
                tracing::error!(error = %self, context = context, severity = "CRITICAL", "Operation failed")
            }
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
