//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use url::Url;

/// Mini-app address used when `MINI_APP_URL` is not provided at all
pub const DEFAULT_MINI_APP_URL: &str = "https://bookly-mini-app.vercel.app";

/// Plain environment variables mapped onto configuration keys.
///
/// These are applied last so they win over `config.toml` and `BOOKLY__*`.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("bot.token", "BOT_TOKEN"),
    ("bot.mini_app_url", "MINI_APP_URL"),
    ("bot.webhook_url", "WEBHOOK_URL"),
    ("bot.media_base_url", "MEDIA_BASE_URL"),
    ("server.port", "PORT"),
    ("database.host", "DB_HOST"),
    ("database.port", "DB_PORT"),
    ("database.name", "DB_NAME"),
    ("database.user", "DB_USER"),
    ("database.password", "DB_PASSWORD"),
];

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationsConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Base URL of the web mini-app; empty means the mini-app is unavailable
    pub mini_app_url: String,
    pub webhook_url: Option<String>,
    /// Public backend origin used to resolve relative cover paths
    pub media_base_url: Option<String>,
}

/// Webhook HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply the bundled migrations on startup (the backend normally owns the schema)
    pub run_migrations: bool,
}

/// Notification windows and pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    pub inactive_days: i64,
    pub unfinished_days: i64,
    pub min_progress: f64,
    pub new_books_window_hours: i64,
    pub send_delay_ms: u64,
}

/// Job scheduler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("BOOKLY").separator("__"));

        for (key, var) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BooklyError> {
        super::validation::validate_settings(self)
    }
}

impl BotConfig {
    /// Parsed mini-app base URL, `None` when it is not configured
    pub fn mini_app_url(&self) -> Option<Url> {
        let raw = self.mini_app_url.trim();
        if raw.is_empty() {
            return None;
        }
        Url::parse(raw).ok()
    }

    /// Webhook URL, `None` when unset or blank (long polling)
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }

    /// Parsed media origin for cover images
    pub fn media_base_url(&self) -> Option<Url> {
        self.media_base_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Url::parse(raw).ok())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                mini_app_url: DEFAULT_MINI_APP_URL.to_string(),
                webhook_url: None,
                media_base_url: None,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                name: "bookly".to_string(),
                user: "postgres".to_string(),
                password: String::new(),
                max_connections: 10,
                min_connections: 1,
                run_migrations: false,
            },
            notifications: NotificationsConfig {
                inactive_days: 3,
                unfinished_days: 7,
                min_progress: 10.0,
                new_books_window_hours: 6,
                send_delay_ms: 50,
            },
            scheduler: SchedulerConfig { enabled: true },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}
