//! Reading progress model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A started book the user has not opened for a while
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnfinishedBook {
    pub user_id: Uuid,
    pub telegram_id: i64,
    pub book_id: Uuid,
    pub title: String,
    pub progress: f64,
    pub last_read_at: DateTime<Utc>,
}
