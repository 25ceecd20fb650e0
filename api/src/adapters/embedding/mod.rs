//! Embedding adapters
//!
//! Local hashing embedder and a remote OpenAI-compatible client, selected at
//! startup through `EmbeddingBackend`.

pub mod hashing;
pub mod http;

use async_trait::async_trait;

pub use hashing::HashingEmbedder;
pub use http::HttpEmbedder;

use crate::config::{EmbeddingConfig, EmbeddingProvider};
use crate::domain::ports::Embedder;
use crate::error::{ConfigError, EmbeddingError};

/// The embedder chosen by configuration
pub enum EmbeddingBackend {
    Hashing(HashingEmbedder),
    Http(HttpEmbedder),
}

impl EmbeddingBackend {
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, ConfigError> {
        match config.provider {
            EmbeddingProvider::Hashing => {
                Ok(EmbeddingBackend::Hashing(HashingEmbedder::new(config.dimensions)))
            }
            EmbeddingProvider::Http => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or(ConfigError::Missing("EMBEDDING_URL"))?;
                let embedder = HttpEmbedder::new(
                    url,
                    config.api_key.clone(),
                    config.model.clone(),
                    config.dimensions,
                    config.timeout,
                )
                .map_err(ConfigError::HttpClient)?;
                Ok(EmbeddingBackend::Http(embedder))
            }
        }
    }

    fn inner(&self) -> &dyn Embedder {
        match self {
            EmbeddingBackend::Hashing(e) => e,
            EmbeddingBackend::Http(e) => e,
        }
    }
}

#[async_trait]
impl Embedder for EmbeddingBackend {
    fn model(&self) -> &str {
        self.inner().model()
    }

    fn dimensions(&self) -> usize {
        self.inner().dimensions()
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.inner().embed(texts).await
    }
}
