//! Message handlers module
//!
//! Handles plain text messages and data sent back by the mini-app

use teloxide::{Bot, types::{Message, MessageEntityKind, WebAppData}, prelude::*};
use tracing::info;
use crate::handlers::{send_unavailable, BotContext};
use crate::mini_app::web_app_keyboard;
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_user_action;
use std::sync::Arc;

pub const OPEN_TEXT: &str = "Откройте Bookly:";
pub const OPEN_BUTTON: &str = "📚 Открыть Bookly";

/// Whether a message is a slash command, known to this bot or not
///
/// Unknown commands and commands addressed to other bots get no reply.
pub fn is_command(msg: &Message) -> bool {
    let leading_entity = msg.entities().is_some_and(|entities| {
        entities
            .iter()
            .any(|entity| entity.offset == 0 && entity.kind == MessageEntityKind::BotCommand)
    });
    leading_entity || msg.text().is_some_and(|text| text.starts_with('/'))
}

/// Handle any text that is not a command
pub async fn handle_text(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> Result<()> {
    let Some(links) = ctx.links.as_ref() else {
        return send_unavailable(&bot, msg.chat.id).await;
    };

    bot.send_message(msg.chat.id, OPEN_TEXT)
        .reply_markup(web_app_keyboard(OPEN_BUTTON, links.home()))
        .await?;
    Ok(())
}

/// Acknowledge data the mini-app sent through `Telegram.WebApp.sendData`
pub async fn handle_web_app_data(bot: Bot, msg: Message, data: WebAppData) -> Result<()> {
    let user_id = msg.from.as_ref().map(|user| user.id.0);
    info!(
        user_id = user_id,
        chat_id = msg.chat.id.0,
        button = %data.button_text,
        data = %truncate_text(&data.data, 200),
        "Web app data received"
    );
    if let Some(user_id) = user_id {
        log_user_action(user_id, "web_app_data", Some(&data.button_text));
    }

    bot.send_message(msg.chat.id, web_app_ack(&data.data)).await?;
    Ok(())
}

pub fn web_app_ack(data: &str) -> String {
    format!("Спасибо! Получено: {}", data)
}
