//! Embedding port trait
//!
//! Turns text into dense vectors. Adapters may run locally or call out to an
//! embedding service.

use async_trait::async_trait;

use crate::error::EmbeddingError;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Name of the model producing the vectors (stored alongside a knowledge base)
    fn model(&self) -> &str;

    /// Length of every vector returned by `embed`
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts, one unit-length vector per input, in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding returned".into()))
    }
}
