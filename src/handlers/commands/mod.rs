//! Command handlers module
//!
//! This module contains handlers for the bot commands: /start, /library and /help

pub mod start;
pub mod library;
pub mod help;

use std::sync::Arc;
use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::handlers::BotContext;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды Bookly:")]
pub enum Command {
    #[command(description = "Приветственное сообщение")]
    Start(String),
    #[command(description = "Открыть вашу библиотеку")]
    Library,
    #[command(description = "Показать справку")]
    Help,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Library => "library",
            Command::Help => "help",
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, ctx: Arc<BotContext>) -> Result<()> {
    if let Some(user) = msg.from.as_ref() {
        log_user_action(user.id.0, cmd.name(), None);
    }
    debug!(chat_id = msg.chat.id.0, command = ?cmd, "Processing command");

    match cmd {
        Command::Start(payload) => start::handle_start(bot, msg, &ctx, &payload).await,
        Command::Library => library::handle_library(bot, msg, &ctx).await,
        Command::Help => help::handle_help(bot, msg).await,
    }
}
