//! Outline Quiz - Telegram bot that quizzes you on your Outline notes
//!
//! Every message sent to the bot is answered with one question built from a
//! random document of an Outline collection. Documents are written as
//! indented bullet outlines; each bullet becomes a concept, and a concept
//! label may carry a `[header|tags] description` suffix.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors and logging
//! - `fetch`: JSON-over-HTTP helper for the document API
//! - `outline`: Document API client and outline normalization
//! - `quiz`: Concept tree, flattening and question templates
//! - `telegram`: Webhook server, MarkdownV2 formatting and delivery

pub mod cli;
pub mod core;
pub mod fetch;
pub mod outline;
pub mod quiz;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, Config};
pub use quiz::{Question, QuizService};
