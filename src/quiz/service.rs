//! Document → question pipeline.

use rand::seq::SliceRandom;
use rand::Rng;

use super::concept::parse_outline;
use super::flatten::flatten_all;
use super::question::{generate_question, Question};
use crate::core::config::{Config, ConfigError};
use crate::core::error::{AppError, AppResult};
use crate::outline::{normalize_outline, Document, OutlineClient};

/// Picks a random document of the collection and asks a question about it
#[derive(Clone)]
pub struct QuizService {
    client: OutlineClient,
    collection_id: String,
}

impl QuizService {
    pub fn new(client: OutlineClient, collection_id: impl Into<String>) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(OutlineClient::from_config(config)?, config.collection_id.clone()))
    }

    /// One question from a uniformly chosen document of the collection.
    pub async fn next_question<R: Rng + Send>(&self, rng: &mut R) -> AppResult<Question> {
        let ids = self.client.list_document_ids(&self.collection_id).await.map_err(|e| {
            log::error!("Failed to list documents of collection {}: {}", self.collection_id, e);
            AppError::from(e)
        })?;

        let Some(document_id) = ids.choose(rng).cloned() else {
            log::warn!("Collection {} has no documents", self.collection_id);
            return Err(AppError::EmptyResult);
        };

        self.question_from_document(&document_id, rng).await
    }

    /// One question from a specific document.
    ///
    /// Every failure is logged with the document id before it is returned.
    pub async fn question_from_document<R: Rng + Send>(&self, document_id: &str, rng: &mut R) -> AppResult<Question> {
        let result = match self.client.fetch_document(document_id).await {
            Ok(document) => build_question(&document, rng),
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(question) => log::info!(
                "Built {:?} question about {:?} from document {}",
                question.template,
                question.label,
                document_id
            ),
            Err(e) => {
                log::error!("Error while building a question from document {} [{}]: {}", document_id, e.category(), e);
            }
        }

        result
    }
}

/// Normalises, parses, flattens and samples one fetched document.
pub fn build_question<R: Rng + ?Sized>(document: &Document, rng: &mut R) -> AppResult<Question> {
    let outline = normalize_outline(&document.text);
    let concepts = parse_outline(&outline)?;
    let flattened = flatten_all(&concepts);

    log::debug!(
        "Document {:?}: {} top-level concept(s), {} quiz target(s)",
        document.title,
        concepts.len(),
        flattened.len()
    );

    generate_question(&document.title, &flattened, rng).ok_or(AppError::EmptyResult)
}
