//! Document API client.
//!
//! Two calls are needed per question: the collection lookup (document ids)
//! and the document fetch (title + markdown body). Both are JSON POSTs with a
//! bearer token.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::core::config::{Config, ConfigError};
use crate::fetch::{post_json, FetchError};

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CollectionInfo {
    documents: Vec<DocumentRef>,
}

#[derive(Deserialize)]
struct DocumentRef {
    id: String,
}

/// A fetched document
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub text: String,
}

/// Client for the document-collection API
#[derive(Clone)]
pub struct OutlineClient {
    http: Client,
    base_url: Url,
}

impl OutlineClient {
    /// Creates a client with the bearer token baked into every request.
    pub fn new(base_url: Url, token: &SecretString, timeout: Duration) -> Result<Self, ConfigError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())).map_err(|e| {
            ConfigError::Invalid {
                key: "OUTLINE_API_TOKEN",
                reason: e.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "OUTLINE_API_URL",
                reason: e.to_string(),
            })?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.outline_api_url.clone(),
            &config.outline_api_token,
            config.http_timeout,
        )
    }

    /// Ids of all documents in the collection, in API order
    pub async fn list_document_ids(&self, collection_id: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint("collections.info")?;
        let response: Envelope<CollectionInfo> = post_json(&self.http, url, &json!({ "id": collection_id })).await?;

        log::debug!(
            "Collection {} lists {} document(s)",
            collection_id,
            response.data.documents.len()
        );
        Ok(response.data.documents.into_iter().map(|d| d.id).collect())
    }

    /// Title and markdown body of one document
    pub async fn fetch_document(&self, document_id: &str) -> Result<Document, FetchError> {
        let url = self.endpoint("documents.info")?;
        let response: Envelope<Document> = post_json(&self.http, url, &json!({ "id": document_id })).await?;
        Ok(response.data)
    }

    fn endpoint(&self, method: &str) -> Result<Url, FetchError> {
        // Keep any path prefix of the base URL (e.g. a reverse-proxy mount).
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", method]);
        Ok(url)
    }
}
