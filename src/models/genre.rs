//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Count of books added to one of a user's favourite genres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GenreActivity {
    pub genre: String,
    pub new_books: i64,
}
