//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{BooklyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_notifications_config(&settings.notifications)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(BooklyError::Config(
            "BOT_TOKEN environment variable not set".to_string()
        ));
    }

    // An empty mini-app URL is allowed (handlers answer with a fixed notice),
    // a malformed one is not.
    let mini_app_url = config.mini_app_url.trim();
    if !mini_app_url.is_empty() {
        url::Url::parse(mini_app_url)?;
    }

    // A blank webhook URL selects long polling
    if let Some(webhook_url) = config.webhook_url() {
        let parsed = url::Url::parse(webhook_url)?;
        if parsed.scheme() != "https" {
            return Err(BooklyError::Config(
                "Webhook URL must use https".to_string()
            ));
        }
    }

    if let Some(ref media_base_url) = config.media_base_url {
        if !media_base_url.trim().is_empty() {
            url::Url::parse(media_base_url.trim())?;
        }
    }

    Ok(())
}

/// Validate webhook server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BooklyError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(BooklyError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BooklyError::Config(
            "Database host is required".to_string()
        ));
    }

    if config.name.is_empty() {
        return Err(BooklyError::Config(
            "Database name is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(BooklyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BooklyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate notification windows
fn validate_notifications_config(config: &super::NotificationsConfig) -> Result<()> {
    if config.inactive_days <= 0 || config.unfinished_days <= 0 {
        return Err(BooklyError::Config(
            "Reminder windows must be at least one day".to_string()
        ));
    }

    if config.new_books_window_hours <= 0 {
        return Err(BooklyError::Config(
            "New book window must be at least one hour".to_string()
        ));
    }

    if !(0.0..100.0).contains(&config.min_progress) {
        return Err(BooklyError::Config(
            format!("Minimum progress must be within 0..100, got {}", config.min_progress)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BooklyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BooklyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
