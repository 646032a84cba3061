//! Book repository implementation
//!
//! Selects new books and the users who should hear about them.

use std::time::Instant;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::NewBookAlert;
use crate::utils::errors::BooklyError;
use crate::utils::logging::log_database_operation;

#[derive(Clone)]
#[derive(Debug)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count books added to the catalogue after `since`
    pub async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, BooklyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books WHERE created_at > $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Books created since `since`, paired with every opted-in user who
    /// favourited another book of the same genre
    ///
    /// One row per (user, book); when several genres match, the
    /// alphabetically first genre names the alert. Books already in the
    /// user's favourites are skipped.
    pub async fn find_new_book_alerts(&self, since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Vec<NewBookAlert>, BooklyError> {
        let started = Instant::now();
        let alerts = sqlx::query_as::<_, NewBookAlert>(
            r#"
            SELECT DISTINCT ON (u.id, b.id)
                u.id AS user_id,
                u.telegram_id,
                g.name AS genre,
                b.id AS book_id,
                b.title,
                b.author,
                b.price,
                b.is_free,
                b.cover_url
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            JOIN genres g ON g.id = bg.genre_id
            JOIN book_genres fbg ON fbg.genre_id = g.id AND fbg.book_id <> b.id
            JOIN favorites f ON f.book_id = fbg.book_id
            JOIN users u ON u.id = f.user_id
            JOIN notification_settings s ON s.user_id = u.id
            WHERE b.created_at >= $1
              AND b.created_at < $2
              AND u.telegram_id IS NOT NULL
              AND s.telegram_enabled = TRUE
              AND s.new_books_in_genre = TRUE
              AND NOT EXISTS (
                  SELECT 1 FROM favorites own
                  WHERE own.user_id = u.id AND own.book_id = b.id
              )
            ORDER BY u.id, b.id, g.name
            "#
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        log_database_operation("find_new_book_alerts", alerts.len(), started.elapsed().as_millis() as u64);
        Ok(alerts)
    }
}
