//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for /start, /library and /help
//! - Message handlers for plain text and mini-app data
//!
//! The same handler tree serves both long polling and the webhook server.

pub mod commands;
pub mod messages;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, Update};

use crate::config::Settings;
use crate::middleware::LoggingMiddleware;
use crate::mini_app::MiniAppLinks;
use crate::utils::errors::{BooklyError, Result};

pub use commands::{handle_command, Command};
pub use messages::{handle_text, handle_web_app_data, is_command};

/// Reply sent when the mini-app URL is not configured
pub const MINI_APP_UNAVAILABLE_TEXT: &str = "⚠️ Mini App временно недоступен. Попробуйте позже.";

/// Shared, read-only data every handler can ask for
#[derive(Debug, Clone, Default)]
pub struct BotContext {
    pub links: Option<MiniAppLinks>,
}

impl BotContext {
    pub fn new(links: Option<MiniAppLinks>) -> Self {
        Self { links }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.bot.mini_app_url().map(MiniAppLinks::new))
    }
}

/// Build the update handler tree
///
/// Dependencies expected at dispatch time: `Bot`, `Update`, `Me` and
/// `Arc<BotContext>`.
pub fn schema(logger: LoggingMiddleware) -> UpdateHandler<BooklyError> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.web_app_data().cloned())
                .endpoint(handle_web_app_data),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some() && !is_command(&msg))
                .endpoint(handle_text),
        );

    dptree::entry()
        .inspect(move |update: Update| logger.log_update(&update))
        .branch(message_handler)
}

/// Tell the chat that the mini-app cannot be opened right now
pub(crate) async fn send_unavailable(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, MINI_APP_UNAVAILABLE_TEXT).await?;
    Ok(())
}
