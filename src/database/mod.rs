//! Database module
//!
//! This module handles database connections and recipient queries

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use repositories::{UserRepository, BookRepository, ReadingProgressRepository};
pub use service::DatabaseService;
