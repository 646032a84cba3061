//! Database repositories module
//! 
//! Recipient queries for the notification jobs

pub mod user;
pub mod book;
pub mod reading_progress;

// Re-export repositories
pub use user::UserRepository;
pub use book::BookRepository;
pub use reading_progress::ReadingProgressRepository;
