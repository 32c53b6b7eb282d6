//! Shared plumbing for outbound JSON calls.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed with status: {0}")]
    Http(reqwest::StatusCode),
    #[error("HTTP request timed out")]
    Timeout,
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Reqwest(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Reqwest(err)
        }
    }
}

/// POSTs `body` as JSON and decodes a JSON answer.
///
/// Non-2xx statuses become [`FetchError::Http`]; a body that does not match
/// `T` surfaces as a decode error inside [`FetchError::Reqwest`].
pub async fn post_json<B, T>(client: &Client, url: url::Url, body: &B) -> Result<T, FetchError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let resp = client.post(url).json(body).send().await?;

    if !resp.status().is_success() {
        return Err(FetchError::Http(resp.status()));
    }

    Ok(resp.json::<T>().await?)
}
