//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

pub const HELP_TEXT: &str = "📖 Справка по боту Bookly:\n\n\
    /start - Приветственное сообщение\n\
    /library - Открыть вашу библиотеку\n\
    /help - Показать это сообщение\n\n\
    Для полноценного использования библиотеки используйте кнопки под сообщениями, которые открывают Mini App.";

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
