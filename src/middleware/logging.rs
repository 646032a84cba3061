//! Logging middleware
//!
//! This module provides logging middleware for tracking bot interactions
//! and update processing time.

use std::time::Instant;
use teloxide::types::{Message, Update, UpdateKind};
use tracing::{info, debug, warn, Span};

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_user_interactions: bool, log_performance: bool) -> Self {
        Self {
            log_user_interactions,
            log_performance,
        }
    }

    /// Log incoming update
    pub fn log_update(&self, update: &Update) {
        if !self.log_user_interactions {
            return;
        }

        match update.kind {
            UpdateKind::Message(ref message) => {
                self.log_message(message);
            }
            _ => {
                debug!(update_id = ?update.id, "Other update type received");
            }
        }
    }

    /// Log message details
    pub fn log_message(&self, message: &Message) {
        if !self.log_user_interactions {
            return;
        }

        let message_type = if message.web_app_data().is_some() {
            "web_app_data"
        } else if crate::handlers::is_command(message) {
            "command"
        } else if message.text().is_some() {
            "text"
        } else {
            "other"
        };

        info!(
            user_id = message.from.as_ref().map(|user| user.id.0),
            username = message.from.as_ref().and_then(|user| user.username.as_deref()),
            chat_id = message.chat.id.0,
            private = message.chat.is_private(),
            message_type = message_type,
            message_id = message.id.0,
            "Message received"
        );
    }

    /// Create a performance tracking span
    pub fn create_performance_span(&self, operation: &str) -> Option<PerformanceTracker> {
        if self.log_performance {
            Some(PerformanceTracker::new(operation.to_string()))
        } else {
            None
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if success {
            debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation completed successfully"
            );
        } else {
            warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        // Telegram expects webhook answers well before its own timeout
        if duration_ms > 1000 {
            warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Slow operation detected"
            );
        }
    }
}
