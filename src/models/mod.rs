//! Data models module
//!
//! Row types read from the Bookly schema by the recipient queries

pub mod user;
pub mod book;
pub mod genre;
pub mod reading_progress;
pub mod notification_settings;

// Re-export commonly used models
pub use user::InactiveUser;
pub use book::{BookSummary, NewBookAlert};
pub use genre::GenreActivity;
pub use reading_progress::UnfinishedBook;
pub use notification_settings::ReminderFrequency;
