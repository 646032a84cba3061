//! Services module
//!
//! This module contains business logic services

pub mod notification;

// Re-export commonly used services
pub use notification::{DeliveryReport, Notification, NotificationKind, NotificationService};
