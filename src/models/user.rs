//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::notification_settings::ReminderFrequency;

/// User selected for an inactivity reminder
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InactiveUser {
    pub user_id: Uuid,
    pub telegram_id: i64,
    pub last_active_at: DateTime<Utc>,
    pub frequency: String,
}

impl InactiveUser {
    pub fn frequency(&self) -> ReminderFrequency {
        ReminderFrequency::parse(&self.frequency)
    }
}
