//! Bookly Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use url::Url;

use bookly_bot::{
    config::Settings,
    database::{connection::DatabaseConfig, create_pool, run_migrations, DatabaseService},
    handlers::{self, BotContext, Command},
    middleware::LoggingMiddleware,
    scheduler::{NotificationJobs, NotificationScheduler},
    server::{self, AppState},
    services::NotificationService,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", bookly_bot::info());

    let bot = Bot::new(&settings.bot.token);
    let ctx = Arc::new(BotContext::from_settings(&settings));
    if ctx.links.is_none() {
        warn!("MINI_APP_URL is empty, commands will answer that the mini-app is unavailable");
    }

    bot.set_my_commands(Command::bot_commands()).await?;

    let mut scheduler = if settings.scheduler.enabled {
        Some(start_scheduler(&settings, bot.clone()).await?)
    } else {
        info!("Notification scheduler disabled");
        None
    };

    let logger = LoggingMiddleware::default();

    match settings.bot.webhook_url() {
        Some(webhook_url) => {
            let webhook_url = Url::parse(webhook_url)?;
            info!("Registering webhook: {}", webhook_url);
            bot.set_webhook(webhook_url).await?;

            let state = AppState {
                me: bot.get_me().await?,
                bot: bot.clone(),
                ctx,
                handler: Arc::new(handlers::schema(logger.clone())),
                logger,
            };

            server::serve(&settings.server.host, settings.server.port, state, shutdown_signal()).await?;
        }
        None => {
            info!("No webhook URL configured, starting long polling...");
            bot.delete_webhook().await?;

            Dispatcher::builder(bot.clone(), handlers::schema(logger))
                .dependencies(dptree::deps![ctx])
                .default_handler(|upd| async move {
                    warn!(update_id = ?upd.id, "Unhandled update");
                })
                .enable_ctrlc_handler()
                .build()
                .dispatch()
                .await;
        }
    }

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.stop();
    }

    info!("Bookly bot has been shut down.");
    Ok(())
}

/// Connect to the library database and start the notification jobs
async fn start_scheduler(settings: &Settings, bot: Bot) -> bookly_bot::Result<NotificationScheduler> {
    info!("Connecting to database...");
    let pool = create_pool(&DatabaseConfig::from_settings(&settings.database)).await?;

    if settings.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let jobs = NotificationJobs::new(
        DatabaseService::new(pool),
        NotificationService::new(bot, settings),
        settings.notifications.clone(),
    );

    let mut scheduler = NotificationScheduler::new(jobs);
    scheduler.start();
    Ok(scheduler)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
