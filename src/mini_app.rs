//! Mini-app links and the keyboards that open them
//!
//! Every button the bot sends launches the web mini-app through a
//! `web_app` inline button; this module owns the URL layout.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use url::Url;
use uuid::Uuid;

/// Deep links into the mini-app, derived from its base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniAppLinks {
    base: Url,
}

impl MiniAppLinks {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Landing page of the mini-app
    pub fn home(&self) -> Url {
        self.base.clone()
    }

    /// The user's personal library
    pub fn my_books(&self) -> Url {
        self.with_path("my-books")
    }

    /// Reader opened on a specific book
    pub fn reader(&self, book_id: Uuid) -> Url {
        self.with_path(&format!("reader/{}", book_id))
    }

    /// Start parameter deep link that opens a book card
    pub fn book(&self, book_id: Uuid) -> Url {
        let mut url = self.base.clone();
        url.set_query(Some(&format!("startapp=book_{}", book_id)));
        url
    }

    fn with_path(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), segment);
        url.set_path(&path);
        url
    }
}

/// Single-button inline keyboard that opens `url` as a web app
pub fn web_app_keyboard(text: &str, url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::web_app(
        text,
        WebAppInfo { url },
    )]])
}
