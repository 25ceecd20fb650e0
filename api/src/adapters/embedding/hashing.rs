//! Local feature-hashing embedder
//!
//! Projects word tokens and character trigrams into a fixed number of buckets
//! using SHA-256. No model download or network access, and the same text
//! always maps to the same vector. Captures lexical overlap rather than deep
//! semantics; point `EMBEDDING_PROVIDER=http` at a real model for that.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::domain::entities::normalize;
use crate::domain::ports::Embedder;
use crate::error::EmbeddingError;

/// Weight of a whole-word feature
const WORD_WEIGHT: f32 = 1.0;

/// Weight of a character trigram feature
const TRIGRAM_WEIGHT: f32 = 0.5;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("static word pattern is valid"))
}

pub struct HashingEmbedder {
    model: String,
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            model: format!("hashing-{}", dimensions),
            dimensions,
        }
    }

    /// Embed one text synchronously
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();

        for word in word_pattern().find_iter(&lowered).map(|m| m.as_str()) {
            self.accumulate(&mut vector, "w", word, WORD_WEIGHT);

            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                self.accumulate(&mut vector, "g", &gram, TRIGRAM_WEIGHT);
            }
        }

        normalize(&mut vector);
        vector
    }

    fn accumulate(&self, vector: &mut [f32], namespace: &str, feature: &str, weight: f32) {
        let digest = Sha256::new()
            .chain_update(namespace.as_bytes())
            .chain_update([0u8])
            .chain_update(feature.as_bytes())
            .finalize();

        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

        vector[bucket] += sign * weight;
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}
