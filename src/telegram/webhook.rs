//! Webhook HTTP server.
//!
//! - `POST /`      - Telegram update; answers 200 with an empty body, always
//! - `GET /health` - Health check

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::net::TcpListener;

use super::bot::{send_failure_notice, send_question};
use crate::core::error::AppError;
use crate::quiz::QuizService;

/// Subset of a Telegram update the bot looks at
#[derive(Debug, Deserialize)]
pub struct WebhookUpdate {
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub from: Option<Sender>,
    /// Not used for question selection
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Sender {
    pub id: i64,
}

impl WebhookUpdate {
    /// Id of the user who wrote the message, which is also the private chat id
    pub fn sender_id(&self) -> Option<i64> {
        self.message.as_ref()?.from.as_ref().map(|from| from.id)
    }
}

/// Shared state for the webhook server.
#[derive(Clone)]
pub struct WebhookState {
    pub quiz: Arc<QuizService>,
    pub bot: Bot,
    pub failure_notice: bool,
}

impl WebhookState {
    pub fn new(quiz: QuizService, bot: Bot, failure_notice: bool) -> Self {
        Self {
            quiz: Arc::new(quiz),
            bot,
            failure_notice,
        }
    }
}

pub fn create_router(state: WebhookState) -> Router {
    Router::new()
        .route("/", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the webhook server and serve until Ctrl-C.
pub async fn run_server(port: u16, state: WebhookState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(state);

    log::info!("Starting webhook server on http://{}", addr);
    log::info!("  POST /      - Telegram webhook");
    log::info!("  GET /health - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

/// POST / — builds a question for the sender and delivers it.
async fn webhook_handler(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let update: WebhookUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("Ignoring malformed webhook body ({} bytes): {}", body.len(), e);
            return StatusCode::OK;
        }
    };

    let Some(sender_id) = update.sender_id() else {
        log::debug!("Ignoring update without a message sender");
        return StatusCode::OK;
    };

    handle_quiz_request(&state, ChatId(sender_id)).await;
    StatusCode::OK
}

/// Builds and sends one question; never fails, only logs.
pub async fn handle_quiz_request(state: &WebhookState, chat_id: ChatId) {
    let mut rng = StdRng::from_entropy();

    match state.quiz.next_question(&mut rng).await {
        Ok(question) => {
            if let Err(e) = send_question(&state.bot, chat_id, &question).await {
                let e = AppError::from(e);
                log::error!("Failed to deliver question to chat {} [{}]: {}", chat_id, e.category(), e);
            }
        }
        Err(e) => {
            log::error!("No question for chat {} [{}]: {}", chat_id, e.category(), e);
            if state.failure_notice {
                if let Err(e) = send_failure_notice(&state.bot, chat_id).await {
                    log::error!("Failed to send failure notice to chat {}: {}", chat_id, e);
                }
            }
        }
    }
}

/// GET /health — simple health check.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
