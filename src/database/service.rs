//! Database service layer
//!
//! High-level recipient selection for each notification kind

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use crate::database::{DatabasePool, UserRepository, BookRepository, ReadingProgressRepository};
use crate::models::*;
use crate::utils::errors::BooklyError;
use crate::utils::helpers::whole_days_between;

/// Recipient of an inactivity reminder together with what is new for them
#[derive(Debug, Clone)]
pub struct InactiveRecipient {
    pub user: InactiveUser,
    pub genre: Option<String>,
    pub new_books: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub books: BookRepository,
    pub reading_progress: ReadingProgressRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            books: BookRepository::new(pool.clone()),
            reading_progress: ReadingProgressRepository::new(pool),
        }
    }

    /// Users inactive for at least `inactive_days` whose reminder frequency is due today
    pub async fn inactive_recipients(&self, now: DateTime<Utc>, inactive_days: i64) -> Result<Vec<InactiveRecipient>, BooklyError> {
        let cutoff = now - Duration::days(inactive_days);
        let candidates = self.users.find_inactive_since(cutoff).await?;
        let mut recipients = Vec::with_capacity(candidates.len());

        for user in candidates {
            let days_inactive = whole_days_between(user.last_active_at, now);
            if !user.frequency().is_due(days_inactive, inactive_days) {
                debug!(user_id = %user.user_id, days_inactive = days_inactive, frequency = %user.frequency, "Reminder not due yet");
                continue;
            }

            let (genre, new_books) = match self.users.top_genre_activity(user.user_id, user.last_active_at).await? {
                Some(activity) => (Some(activity.genre), activity.new_books),
                None => (None, self.books.count_created_since(user.last_active_at).await?),
            };

            recipients.push(InactiveRecipient { user, genre, new_books });
        }

        Ok(recipients)
    }

    /// Started books untouched for `unfinished_days`
    pub async fn unfinished_books(&self, now: DateTime<Utc>, unfinished_days: i64, min_progress: f64) -> Result<Vec<UnfinishedBook>, BooklyError> {
        let cutoff = now - Duration::days(unfinished_days);
        self.reading_progress.find_unfinished(min_progress, cutoff).await
    }

    /// New books in the `window_hours` before the `fire_time` slot, matched by favourite genre
    pub async fn new_book_alerts(&self, fire_time: DateTime<Utc>, window_hours: i64) -> Result<Vec<NewBookAlert>, BooklyError> {
        let (since, until) = new_book_window(fire_time, window_hours);
        self.books.find_new_book_alerts(since, until).await
    }
}

/// Half-open `[since, until)` creation window for the new-book slot firing at `fire_time`
///
/// Consecutive slots `window_hours` apart cover every instant exactly once.
pub fn new_book_window(fire_time: DateTime<Utc>, window_hours: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    (fire_time - Duration::hours(window_hours), fire_time)
}
