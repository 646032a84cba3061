//! Library command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::handlers::{send_unavailable, BotContext};
use crate::mini_app::web_app_keyboard;
use crate::utils::errors::Result;

pub const LIBRARY_TEXT: &str = "📚 Откройте вашу библиотеку в Mini App:";
pub const LIBRARY_BUTTON: &str = "📚 Мои книги";

/// Handle /library command
pub async fn handle_library(bot: Bot, msg: Message, ctx: &BotContext) -> Result<()> {
    let Some(links) = ctx.links.as_ref() else {
        return send_unavailable(&bot, msg.chat.id).await;
    };

    bot.send_message(msg.chat.id, LIBRARY_TEXT)
        .reply_markup(web_app_keyboard(LIBRARY_BUTTON, links.my_books()))
        .await?;
    Ok(())
}
