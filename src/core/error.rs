use thiserror::Error;

use crate::core::config::ConfigError;
use crate::fetch::FetchError;
use crate::quiz::concept::ParseError;

/// Centralized error types for the application
///
/// Every failure on the way from a webhook call to a delivered question ends
/// up in this enum. The webhook boundary logs it and still acknowledges the
/// call, so none of these variants ever reach the Telegram caller.
///
/// # Example
///
/// ```
/// use outline_quiz::core::error::AppError;
///
/// let err = AppError::EmptyResult;
/// assert_eq!(err.to_string(), "Document has no quiz content");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid settings, fatal at startup
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document API call failed or answered with an unexpected body
    #[error("Upstream fetch error: {0}")]
    Upstream(#[from] FetchError),

    /// Outline text could not be turned into a concept tree
    #[error("Outline parse error: {0}")]
    Parse(#[from] ParseError),

    /// The document parsed fine but nothing in it can be asked about
    #[error("Document has no quiz content")]
    EmptyResult,

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

impl AppError {
    /// Short category name used in log lines
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Upstream(_) => "upstream",
            AppError::Parse(_) => "parse",
            AppError::EmptyResult => "empty",
            AppError::Telegram(_) => "telegram",
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
