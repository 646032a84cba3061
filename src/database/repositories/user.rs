//! User repository implementation
//!
//! Selects recipients for inactivity reminders.

use std::time::Instant;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::{InactiveUser, GenreActivity};
use crate::utils::errors::BooklyError;
use crate::utils::logging::log_database_operation;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Users with Telegram notifications enabled who have not been active since `cutoff`
    ///
    /// Reading a book counts as activity, so any progress row newer than the
    /// cutoff excludes the user.
    pub async fn find_inactive_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<InactiveUser>, BooklyError> {
        let started = Instant::now();
        let users = sqlx::query_as::<_, InactiveUser>(
            r#"
            SELECT u.id AS user_id, u.telegram_id, u.last_active_at, s.frequency
            FROM users u
            JOIN notification_settings s ON s.user_id = u.id
            WHERE u.telegram_id IS NOT NULL
              AND s.telegram_enabled = TRUE
              AND u.last_active_at < $1
              AND NOT EXISTS (
                  SELECT 1 FROM reading_progress rp
                  WHERE rp.user_id = u.id AND rp.last_read_at >= $1
              )
            ORDER BY u.last_active_at
            "#
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        log_database_operation("find_inactive_users", users.len(), started.elapsed().as_millis() as u64);
        Ok(users)
    }

    /// The favourite genre with the most books added after `since`
    ///
    /// Favourite genres are the genres of the books the user added to favourites.
    pub async fn top_genre_activity(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<Option<GenreActivity>, BooklyError> {
        let activity = sqlx::query_as::<_, GenreActivity>(
            r#"
            SELECT g.name AS genre, COUNT(DISTINCT b.id) AS new_books
            FROM favorites f
            JOIN book_genres fbg ON fbg.book_id = f.book_id
            JOIN genres g ON g.id = fbg.genre_id
            JOIN book_genres bg ON bg.genre_id = g.id
            JOIN books b ON b.id = bg.book_id
            WHERE f.user_id = $1
              AND b.created_at > $2
            GROUP BY g.name
            ORDER BY new_books DESC, g.name
            LIMIT 1
            "#
        )
        .bind(user_id)
        .bind(since)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }
}
