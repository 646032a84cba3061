//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Book fields needed to render a notification
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    #[sqlx(rename = "book_id")]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub is_free: bool,
    pub cover_url: Option<String>,
}

/// A newly added book matched to a user through a shared genre
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewBookAlert {
    pub user_id: Uuid,
    pub telegram_id: i64,
    pub genre: String,
    #[sqlx(flatten)]
    pub book: BookSummary,
}
