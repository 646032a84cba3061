//! Reading progress repository implementation

use std::time::Instant;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::UnfinishedBook;
use crate::utils::errors::BooklyError;
use crate::utils::logging::log_database_operation;

#[derive(Clone)]
#[derive(Debug)]
pub struct ReadingProgressRepository {
    pool: PgPool,
}

impl ReadingProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Books started past `min_progress` percent, not finished, and untouched since `cutoff`
    pub async fn find_unfinished(&self, min_progress: f64, cutoff: DateTime<Utc>) -> Result<Vec<UnfinishedBook>, BooklyError> {
        let started = Instant::now();
        let records = sqlx::query_as::<_, UnfinishedBook>(
            r#"
            SELECT rp.user_id, u.telegram_id, rp.book_id, b.title, rp.progress, rp.last_read_at
            FROM reading_progress rp
            JOIN users u ON u.id = rp.user_id
            JOIN books b ON b.id = rp.book_id
            JOIN notification_settings s ON s.user_id = u.id
            WHERE rp.progress > $1
              AND rp.progress < 100
              AND rp.last_read_at < $2
              AND u.telegram_id IS NOT NULL
              AND s.telegram_enabled = TRUE
              AND s.unfinished_reminder = TRUE
            ORDER BY rp.last_read_at
            "#
        )
        .bind(min_progress)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        log_database_operation("find_unfinished_books", records.len(), started.elapsed().as_millis() as u64);
        Ok(records)
    }
}
