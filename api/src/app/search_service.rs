//! Search service
//!
//! Hybrid search over a tenant's knowledge base. Fuzzy matching finds
//! literal and near-literal mentions of the query in titles and content;
//! semantic search fills the remaining slots with the nearest documents by
//! embedding. Results are merged, de-duplicated and capped.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{HitSource, KnowledgeBase, SearchHit, TenantId};
use crate::domain::ports::{Embedder, KnowledgeBaseStore};
use crate::error::{AppError, DomainError};

use super::fuzzy::partial_ratio;
use super::search_config::{
    CONTENT_EXACT_SCORE, FUZZY_THRESHOLD, MAX_QUERY_CHARS, MAX_RESULTS, SEMANTIC_TOP_K,
    SNIPPET_CHARS, TITLE_BOOST, TITLE_EXACT_SCORE,
};
use super::KnowledgeBaseService;

/// Service for searching tenant knowledge bases
pub struct SearchService<S, E>
where
    S: KnowledgeBaseStore,
    E: Embedder,
{
    knowledge_bases: Arc<KnowledgeBaseService<S, E>>,
}

impl<S, E> SearchService<S, E>
where
    S: KnowledgeBaseStore,
    E: Embedder,
{
    pub fn new(knowledge_bases: Arc<KnowledgeBaseService<S, E>>) -> Self {
        Self { knowledge_bases }
    }

    /// Run a hybrid search, returning at most `MAX_RESULTS` hits
    pub async fn search(&self, tenant_id: &str, query: &str) -> Result<Vec<SearchHit>, AppError> {
        let query = query.to_lowercase();
        if tenant_id.trim().is_empty() || query.trim().is_empty() {
            return Err(DomainError::Validation("Missing tenant_id or query".into()).into());
        }
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(DomainError::Validation(format!(
                "Query is too long (max {} characters)",
                MAX_QUERY_CHARS
            ))
            .into());
        }
        let tenant_id = TenantId::parse(tenant_id)?;
        let kb = self.knowledge_bases.require(&tenant_id).await?;

        let embedder = self.knowledge_bases.embedder();
        if !kb.is_compatible_with(embedder.model(), embedder.dimensions()) {
            return Err(DomainError::Conflict(format!(
                "KB for tenant {} was built with {} ({} dims) but the server uses {} ({} dims); re-upload the documents",
                tenant_id,
                kb.model,
                kb.dimensions,
                embedder.model(),
                embedder.dimensions()
            ))
            .into());
        }
        if kb.is_empty() {
            return Ok(Vec::new());
        }

        let fuzzy = {
            let kb = kb.clone();
            let query = query.clone();
            tokio::task::spawn_blocking(move || fuzzy_hits(&kb, &query))
                .await
                .map_err(|e| AppError::Internal(format!("Fuzzy search task failed: {}", e)))?
        };

        // A full page of fuzzy hits leaves no room for semantic ones
        let semantic = if needs_semantic(&fuzzy) {
            let query_vector = embedder.embed_one(&query).await?;
            semantic_hits(&kb, &query_vector)
        } else {
            Vec::new()
        };

        let results = merge_hits(fuzzy, semantic);
        tracing::debug!(
            tenant_id = %tenant_id,
            query = %query,
            results = results.len(),
            "Search completed"
        );
        Ok(results)
    }
}

/// Fuzzy hits with boosted scores, in document order
pub fn fuzzy_hits(kb: &KnowledgeBase, query: &str) -> Vec<SearchHit> {
    kb.documents
        .iter()
        .filter_map(|doc| {
            let score_title = partial_ratio(query, &doc.title.to_lowercase());
            let score_content = partial_ratio(query, &doc.content.to_lowercase());
            let score = score_title.max(score_content);

            if score < FUZZY_THRESHOLD {
                return None;
            }

            let boosted = if score_title >= 100.0 {
                TITLE_EXACT_SCORE
            } else if score_content >= 100.0 {
                CONTENT_EXACT_SCORE
            } else if score_title > score_content {
                score + TITLE_BOOST
            } else {
                score
            };

            Some(SearchHit::new(doc, SNIPPET_CHARS, boosted, HitSource::Fuzzy))
        })
        .collect()
}

/// Nearest documents to the query vector, best first
pub fn semantic_hits(kb: &KnowledgeBase, query_vector: &[f32]) -> Vec<SearchHit> {
    kb.nearest(query_vector, SEMANTIC_TOP_K)
        .into_iter()
        .map(|(doc, score)| SearchHit::new(doc, SNIPPET_CHARS, f64::from(score), HitSource::Semantic))
        .collect()
}

fn max_score(hits: &[SearchHit]) -> f64 {
    hits.iter().map(|h| h.score).fold(0.0, f64::max)
}

/// Whether semantic hits could still make it into the merged results
fn needs_semantic(fuzzy: &[SearchHit]) -> bool {
    let distinct: HashSet<String> = fuzzy.iter().map(SearchHit::dedup_key).collect();
    distinct.len() < MAX_RESULTS || max_score(fuzzy) < FUZZY_THRESHOLD
}

/// Merge fuzzy and semantic hits
///
/// Fuzzy hits go first, best score first. Semantic hits are appended only
/// while the page is short or no fuzzy hit reached the threshold. Each url
/// appears at most once.
pub fn merge_hits(mut fuzzy: Vec<SearchHit>, mut semantic: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(MAX_RESULTS);

    fuzzy.sort_by(|a, b| b.score.total_cmp(&a.score));
    let max_fuzzy = max_score(&fuzzy);
    take_unique(&mut results, &mut seen, fuzzy);

    if results.len() < MAX_RESULTS || max_fuzzy < FUZZY_THRESHOLD {
        semantic.sort_by(|a, b| b.score.total_cmp(&a.score));
        take_unique(&mut results, &mut seen, semantic);
    }

    results
}

fn take_unique(results: &mut Vec<SearchHit>, seen: &mut HashSet<String>, hits: Vec<SearchHit>) {
    for hit in hits {
        if results.len() >= MAX_RESULTS {
            break;
        }
        if seen.insert(hit.dedup_key()) {
            results.push(hit);
        }
    }
}
