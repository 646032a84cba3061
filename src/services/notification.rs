//! Notification service implementation
//!
//! This service renders the reminder and alert messages, attaches the
//! mini-app keyboard, and delivers them through teloxide. Delivery failures
//! are logged and counted, never retried.

use std::collections::HashMap;
use std::time::Duration;
use teloxide::{Bot, types::{ChatId, InlineKeyboardMarkup, InputFile}, requests::Requester, payloads::{SendMessageSetters, SendPhotoSetters}};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;
use crate::config::settings::Settings;
use crate::database::service::InactiveRecipient;
use crate::mini_app::{web_app_keyboard, MiniAppLinks};
use crate::models::{BookSummary, NewBookAlert, UnfinishedBook};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_number, resolve_media_url};
use crate::utils::logging::log_notification;

const INACTIVE_WITH_GENRE: &str = "📚 Привет! Мы скучали по тебе. В библиотеке появилось {count} новых книг в жанре {genre}. Возвращайся почитать что-то интересное!";
const INACTIVE_WITH_COUNT: &str = "📚 Привет! Мы скучали по тебе. В библиотеке появилось {count} новых книг. Возвращайся почитать что-то интересное!";
const INACTIVE_PLAIN: &str = "📚 Привет! Мы скучали по тебе. Возвращайся в библиотеку, там много интересного!";
const UNFINISHED: &str = "📖 Вы остановились на {progress}% книги «{title}». Продолжить чтение?";
const NEW_BOOK: &str = "🆕 Новая книга в жанре {genre}!\n📕 {title}\n✍️ {author}\n{price}";

const OPEN_LIBRARY_BUTTON: &str = "Открыть библиотеку";
const CONTINUE_READING_BUTTON: &str = "Продолжить чтение";
const VIEW_BOOK_BUTTON: &str = "Посмотреть книгу";

/// The three kinds of messages pushed by the scheduled jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    InactiveReminder,
    UnfinishedReminder,
    NewBook,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::InactiveReminder => "inactive_reminder",
            NotificationKind::UnfinishedReminder => "unfinished_reminder",
            NotificationKind::NewBook => "new_book",
        }
    }
}

/// A rendered message ready to be sent
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub chat_id: ChatId,
    pub text: String,
    /// Sent as a photo with `text` as caption when present
    pub photo: Option<Url>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

/// Outcome of delivering a batch of notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
}

/// Notification service for message rendering and delivery
#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    links: Option<MiniAppLinks>,
    media_base_url: Option<Url>,
    send_delay: Duration,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(bot: Bot, settings: &Settings) -> Self {
        Self {
            bot,
            links: settings.bot.mini_app_url().map(MiniAppLinks::new),
            media_base_url: settings.bot.media_base_url(),
            send_delay: Duration::from_millis(settings.notifications.send_delay_ms),
        }
    }

    /// Reminder for a user who has not opened the library for a while
    pub fn inactive_reminder(&self, recipient: &InactiveRecipient) -> Notification {
        let mut params = HashMap::new();
        params.insert("count", recipient.new_books.to_string());

        let text = match (&recipient.genre, recipient.new_books) {
            (Some(genre), count) if count > 0 => {
                params.insert("genre", genre.clone());
                render(INACTIVE_WITH_GENRE, &params)
            }
            (None, count) if count > 0 => render(INACTIVE_WITH_COUNT, &params),
            _ => INACTIVE_PLAIN.to_string(),
        };

        Notification {
            kind: NotificationKind::InactiveReminder,
            chat_id: ChatId(recipient.user.telegram_id),
            text,
            photo: None,
            keyboard: self.links.as_ref().map(|links| web_app_keyboard(OPEN_LIBRARY_BUTTON, links.home())),
        }
    }

    /// Reminder to continue a started book
    pub fn unfinished_reminder(&self, record: &UnfinishedBook) -> Notification {
        let mut params = HashMap::new();
        params.insert("progress", format_number(record.progress));
        params.insert("title", record.title.clone());

        Notification {
            kind: NotificationKind::UnfinishedReminder,
            chat_id: ChatId(record.telegram_id),
            text: render(UNFINISHED, &params),
            photo: None,
            keyboard: self.links.as_ref().map(|links| web_app_keyboard(CONTINUE_READING_BUTTON, links.reader(record.book_id))),
        }
    }

    /// Alert about a book added to one of the user's favourite genres
    pub fn new_book_alert(&self, alert: &NewBookAlert) -> Notification {
        let book = &alert.book;
        let photo = book
            .cover_url
            .as_deref()
            .and_then(|cover| resolve_media_url(cover, self.media_base_url.as_ref()));

        Notification {
            kind: NotificationKind::NewBook,
            chat_id: ChatId(alert.telegram_id),
            text: new_book_caption(Some(&alert.genre), book),
            photo,
            keyboard: self.links.as_ref().map(|links| web_app_keyboard(VIEW_BOOK_BUTTON, links.book(book.id))),
        }
    }

    /// Send a single notification
    pub async fn send(&self, notification: &Notification) -> Result<()> {
        debug!(chat_id = ?notification.chat_id, kind = notification.kind.as_str(), "Sending notification");

        match &notification.photo {
            Some(photo) => {
                let mut request = self
                    .bot
                    .send_photo(notification.chat_id, InputFile::url(photo.clone()))
                    .caption(notification.text.clone());
                if let Some(keyboard) = &notification.keyboard {
                    request = request.reply_markup(keyboard.clone());
                }
                request.await?;
            }
            None => {
                let mut request = self.bot.send_message(notification.chat_id, notification.text.clone());
                if let Some(keyboard) = &notification.keyboard {
                    request = request.reply_markup(keyboard.clone());
                }
                request.await?;
            }
        }

        Ok(())
    }

    /// Send notifications one by one, logging and counting failures
    pub async fn deliver(&self, notifications: &[Notification]) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for (index, notification) in notifications.iter().enumerate() {
            if index > 0 && !self.send_delay.is_zero() {
                // Small delay between messages to stay under Telegram's rate limits
                tokio::time::sleep(self.send_delay).await;
            }

            match self.send(notification).await {
                Ok(()) => {
                    report.sent += 1;
                    log_notification(notification.kind.as_str(), notification.chat_id.0, true, None);
                }
                Err(e) => {
                    report.failed += 1;
                    let message = e.to_string();
                    log_notification(notification.kind.as_str(), notification.chat_id.0, false, Some(&message));
                }
            }
        }

        info!(sent = report.sent, failed = report.failed, "Notification batch delivered");
        report
    }
}

/// Caption for a new book alert
pub fn new_book_caption(genre: Option<&str>, book: &BookSummary) -> String {
    let price = if book.is_free {
        "💰 Бесплатно".to_string()
    } else {
        format!("💰 {}₽", format_number(book.price))
    };

    let mut params = HashMap::new();
    params.insert("genre", genre.unwrap_or("книги").to_string());
    params.insert("title", book.title.clone());
    params.insert("author", book.author.clone());
    params.insert("price", price);

    render(NEW_BOOK, &params)
}

/// Substitute `{name}` placeholders in a single pass
///
/// Substituted values are never rescanned, so titles containing braces stay intact.
/// Unknown placeholders are kept verbatim.
fn render(template: &str, params: &HashMap<&str, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match params.get(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}
