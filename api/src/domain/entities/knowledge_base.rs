//! Knowledge base domain entity
//!
//! A tenant's full set of embedded documents. Uploading replaces the whole
//! knowledge base; there is no incremental indexing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StoredDocument, TenantId};

/// A tenant's embedded documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub tenant_id: TenantId,
    /// Embedding model the vectors were produced with
    pub model: String,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
    pub documents: Vec<StoredDocument>,
}

impl KnowledgeBase {
    pub fn new(
        tenant_id: TenantId,
        model: String,
        dimensions: usize,
        documents: Vec<StoredDocument>,
    ) -> Self {
        Self {
            tenant_id,
            model,
            dimensions,
            created_at: Utc::now(),
            documents,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether vectors from `model`/`dimensions` can be compared with this knowledge base
    pub fn is_compatible_with(&self, model: &str, dimensions: usize) -> bool {
        self.model == model && self.dimensions == dimensions
    }

    /// The `k` documents most similar to `query`, best first
    ///
    /// Ties keep upload order.
    pub fn nearest(&self, query: &[f32], k: usize) -> Vec<(&StoredDocument, f32)> {
        let mut scored: Vec<(&StoredDocument, f32)> = self
            .documents
            .iter()
            .map(|doc| (doc, cosine_similarity(query, &doc.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity; zero when either vector has no magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scale `v` to unit length in place (no-op for the zero vector)
pub fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
