//! Middleware module
//! 
//! This module contains middleware for update processing

pub mod logging;

// Re-export commonly used middleware
pub use logging::LoggingMiddleware;
