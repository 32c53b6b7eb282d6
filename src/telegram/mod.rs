//! Telegram side: webhook intake, message formatting and delivery

pub mod bot;
pub mod markdown;
pub mod message;
pub mod webhook;

// Re-exports for convenience
pub use bot::{create_bot, send_failure_notice, send_question};
pub use message::{answer_keyboard, format_question, format_question_plain};
pub use webhook::{create_router, run_server, WebhookState, WebhookUpdate};
