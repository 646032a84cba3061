//! Bookly Telegram Bot
//!
//! Companion bot for the Bookly online library. It answers a few commands
//! with buttons that open the library mini-app, receives updates over a
//! webhook or long polling, and pushes scheduled reading reminders and
//! new-book alerts based on data in the library's PostgreSQL database.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod mini_app;
pub mod middleware;
pub mod scheduler;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BooklyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{BotContext, Command};
pub use scheduler::{NotificationJobs, NotificationScheduler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
