//! Start command handler
//!
//! Greets the user and offers the button that opens the library

use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use tracing::debug;
use crate::handlers::{send_unavailable, BotContext};
use crate::mini_app::web_app_keyboard;
use crate::utils::errors::Result;
use crate::utils::helpers::html_user_mention;

pub const START_BUTTON: &str = "📚 Открыть библиотеку";

/// Handle /start command
///
/// A deep-link payload (`/start book_<id>`) is accepted but the reply is the
/// same greeting; the mini-app reads the start parameter itself.
pub async fn handle_start(bot: Bot, msg: Message, ctx: &BotContext, payload: &str) -> Result<()> {
    if !payload.is_empty() {
        debug!(chat_id = msg.chat.id.0, payload = payload, "Start command with payload");
    }

    let Some(links) = ctx.links.as_ref() else {
        return send_unavailable(&bot, msg.chat.id).await;
    };

    let mention = msg
        .from
        .as_ref()
        .map(html_user_mention)
        .unwrap_or_else(|| "читатель".to_string());

    bot.send_message(msg.chat.id, welcome_text(&mention))
        .parse_mode(ParseMode::Html)
        .reply_markup(web_app_keyboard(START_BUTTON, links.home()))
        .await?;
    Ok(())
}

/// Greeting for `/start`; `mention` is already HTML
pub fn welcome_text(mention: &str) -> String {
    format!(
        "Привет, {}! 👋\n\n\
        Добро пожаловать в Bookly - телеграмм бот для онлайн-библиотеки. \
        Через этого бота вы можете читать книги, добавлять их в избранное и покупать платные издания.\n\n\
        Чтобы открыть приложение, нажмите кнопку \"Открыть библиотеку\" ниже.",
        mention
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_text() {
        let text = welcome_text("<a href=\"tg://user?id=1\">Анна</a>");
        assert!(text.starts_with("Привет, <a href=\"tg://user?id=1\">Анна</a>! 👋\n\n"));
        assert!(text.contains("Добро пожаловать в Bookly"));
        assert!(text.ends_with("нажмите кнопку \"Открыть библиотеку\" ниже."));
    }
}
