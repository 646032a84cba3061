//! Webhook server
//!
//! Receives Telegram updates over HTTP and runs them through the same
//! handler tree the polling dispatcher uses. Telegram retries any non-2xx
//! answer, so every webhook response is `200` and failures are reported in
//! the JSON body instead.

use std::future::Future;
use std::net::SocketAddr;
use std::ops::ControlFlow;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{Me, Update};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::handlers::BotContext;
use crate::middleware::LoggingMiddleware;
use crate::utils::errors::{BooklyError, Result};

pub const BOT_NAME: &str = "Bookly Telegram Bot";

/// Everything a webhook request needs to dispatch an update
#[derive(Clone)]
pub struct AppState {
    pub bot: Bot,
    pub me: Me,
    pub ctx: Arc<BotContext>,
    pub handler: Arc<UpdateHandler<BooklyError>>,
    pub logger: LoggingMiddleware,
}

/// Build the webhook router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler).post(webhook_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

/// Bind `host:port` and serve the webhook router until `shutdown` resolves
pub async fn serve<F>(host: &str, port: u16, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| BooklyError::Config(format!("Invalid server address {}:{}: {}", host, port, e)))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Starting webhook server on http://{}", addr);
    info!("  GET  /         - Health check");
    info!("  POST /webhook  - Telegram updates");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Webhook server stopped");
    Ok(())
}

/// GET /: health check
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "bot": BOT_NAME }))
}

/// POST / and POST /webhook: one Telegram update per request
async fn webhook_handler(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    match process_update(&state, &body).await {
        Ok(()) => Json(json!({ "status": "ok" })),
        Err(e) => {
            e.log("webhook");
            Json(json!({ "status": "error", "message": e.to_string() }))
        }
    }
}

async fn process_update(state: &AppState, body: &[u8]) -> Result<()> {
    let update: Update = serde_json::from_slice(body)?;
    let tracker = state.logger.create_performance_span("webhook_update");

    let deps = dptree::deps![
        state.bot.clone(),
        state.me.clone(),
        state.ctx.clone(),
        update
    ];

    let result = match state.handler.dispatch(deps).await {
        ControlFlow::Break(result) => result,
        ControlFlow::Continue(_) => {
            debug!("Update not handled by any branch");
            Ok(())
        }
    };

    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    result
}
