//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use teloxide::types::User;
use url::Url;

/// Format a number the way reminders show it: no trailing `.0`, at most two decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.2}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// HTML link mentioning a Telegram user by id
pub fn html_user_mention(user: &User) -> String {
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user.id.0,
        teloxide::utils::html::escape(&user.full_name())
    )
}

/// Resolve a stored cover path into an absolute URL Telegram can fetch
///
/// Absolute URLs pass through; relative paths need `base`.
pub fn resolve_media_url(raw: &str, base: Option<&Url>) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => base.and_then(|base| base.join(raw).ok()),
        Err(_) => None,
    }
}

/// Whole days elapsed between `since` and `now`
pub fn whole_days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(since).num_days()
}
