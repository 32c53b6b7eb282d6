//! Runtime configuration loaded from the environment.
//!
//! Everything is read once at startup into a [`Config`] value that is then
//! handed to the components that need it. Missing credentials fail here,
//! before the server binds, instead of deep inside a request.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default webhook listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default timeout for every outbound HTTP call (in seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
pub struct Config {
    /// Telegram bot token (BOT_TOKEN or TELOXIDE_TOKEN)
    pub bot_token: SecretString,
    /// Custom Bot API server (BOT_API_URL)
    pub bot_api_url: Option<Url>,
    /// Base URL of the document API (OUTLINE_API_URL)
    pub outline_api_url: Url,
    /// Bearer token for the document API (OUTLINE_API_TOKEN)
    pub outline_api_token: SecretString,
    /// Collection whose documents are quizzed (OUTLINE_COLLECTION_ID)
    pub collection_id: String,
    /// Webhook listen port (PORT)
    pub port: u16,
    /// Timeout for outbound calls (HTTP_TIMEOUT_SECS)
    pub http_timeout: Duration,
    /// Apologise in the chat when no question could be built (QUIZ_FAILURE_NOTICE)
    pub failure_notice: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let bot_api_url = get("BOT_API_URL").map(|raw| parse_url("BOT_API_URL", &raw)).transpose()?;
        let outline_api_url = parse_url("OUTLINE_API_URL", &require("OUTLINE_API_URL")?)?;
        let outline_api_token = require("OUTLINE_API_TOKEN")?;
        let collection_id = require("OUTLINE_COLLECTION_ID")?;

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_or("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let failure_notice = parse_or("QUIZ_FAILURE_NOTICE", get("QUIZ_FAILURE_NOTICE"), false)?;

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            bot_api_url,
            outline_api_url,
            outline_api_token: SecretString::from(outline_api_token),
            collection_id,
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            failure_notice,
        })
    }

    /// Returns true if a non-default Bot API server is configured.
    pub fn uses_local_bot_api(&self) -> bool {
        self.bot_api_url
            .as_ref()
            .and_then(|url| url.host_str())
            .map(|host| host != "api.telegram.org")
            .unwrap_or(false)
    }

    /// Logs the effective settings with secrets redacted
    pub fn log_summary(&self) {
        log::info!("Document API: {}", self.outline_api_url);
        log::info!("Collection: {}", self.collection_id);
        log::info!(
            "Bot API: {}",
            self.bot_api_url
                .as_ref()
                .map(Url::as_str)
                .unwrap_or("https://api.telegram.org (default)")
        );
        log::info!("Outbound timeout: {}s", self.http_timeout.as_secs());
        log::info!("Failure notice: {}", self.failure_notice);
        log::debug!("Bot token length: {}", self.bot_token.expose_secret().len());
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_api_url", &self.bot_api_url)
            .field("outline_api_url", &self.outline_api_url)
            .field("collection_id", &self.collection_id)
            .field("port", &self.port)
            .field("http_timeout", &self.http_timeout)
            .field("failure_notice", &self.failure_notice)
            .finish_non_exhaustive()
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("{:?}: {}", value, e),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("BOT_TOKEN", "123:abc"),
        ("OUTLINE_API_URL", "https://docs.example.com"),
        ("OUTLINE_API_TOKEN", "secret"),
        ("OUTLINE_COLLECTION_ID", "col-1"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert_eq!(config.collection_id, "col-1");
        assert_eq!(config.outline_api_token.expose_secret(), "secret");
        assert!(config.bot_api_url.is_none());
        assert!(!config.failure_notice);
        assert!(!config.uses_local_bot_api());
    }

    #[test]
    fn test_missing_bot_token() {
        let err = Config::from_lookup(lookup(&REQUIRED[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BOT_TOKEN")));
    }

    #[test]
    fn test_teloxide_token_fallback() {
        let mut pairs = REQUIRED[1..].to_vec();
        pairs.push(("TELOXIDE_TOKEN", "999:xyz"));

        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.bot_token.expose_secret(), "999:xyz");
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[3] = ("OUTLINE_COLLECTION_ID", "   ");

        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OUTLINE_COLLECTION_ID")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("OUTLINE_API_URL", "not a url");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "OUTLINE_API_URL", .. }));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("HTTP_TIMEOUT_SECS", "0"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HTTP_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("BOT_API_URL", "http://localhost:8081"),
            ("PORT", "9000"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("QUIZ_FAILURE_NOTICE", "true"),
        ]);

        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert!(config.failure_notice);
        assert!(config.uses_local_bot_api());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("123:abc"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("col-1"));
    }
}
