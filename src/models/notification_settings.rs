//! Notification settings model

use serde::{Deserialize, Serialize};

/// How often a user wants to be reminded, as stored in `notification_settings.frequency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderFrequency {
    Daily,
    EveryThreeDays,
    Weekly,
}

impl ReminderFrequency {
    /// Parse the stored value; unknown values fall back to daily
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "3days" => ReminderFrequency::EveryThreeDays,
            "weekly" => ReminderFrequency::Weekly,
            _ => ReminderFrequency::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::EveryThreeDays => "3days",
            ReminderFrequency::Weekly => "weekly",
        }
    }

    pub fn period_days(&self) -> i64 {
        match self {
            ReminderFrequency::Daily => 1,
            ReminderFrequency::EveryThreeDays => 3,
            ReminderFrequency::Weekly => 7,
        }
    }

    /// Whether a user inactive for `days_inactive` whole days gets a reminder today
    pub fn is_due(&self, days_inactive: i64, min_inactive_days: i64) -> bool {
        days_inactive >= min_inactive_days && days_inactive % self.period_days() == 0
    }
}
