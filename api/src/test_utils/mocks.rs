//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record how they were called.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::Notify;

use crate::adapters::embedding::HashingEmbedder;
use crate::domain::entities::{KnowledgeBase, TenantId};
use crate::domain::ports::{Embedder, KnowledgeBaseStore};
use crate::error::{DomainError, EmbeddingError};

/// Model name reported by `MockEmbedder`
pub const MOCK_MODEL: &str = "mock-embedder";

/// Vector size produced by `MockEmbedder`
pub const MOCK_DIMENSIONS: usize = 64;

// ============================================================================
// In-Memory Knowledge Base Store
// ============================================================================

/// Holds `save` calls until released
#[derive(Default)]
pub struct SaveGate {
    /// Notified when a save starts waiting
    pub entered: Notify,
    /// Notify to let the waiting save finish
    pub release: Notify,
}

#[derive(Default)]
pub struct InMemoryKnowledgeBaseStore {
    knowledge_bases: Arc<RwLock<HashMap<TenantId, KnowledgeBase>>>,
    load_calls: AtomicUsize,
    save_gate: Option<Arc<SaveGate>>,
}

impl InMemoryKnowledgeBaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a knowledge base for testing
    pub fn with_knowledge_base(self, kb: KnowledgeBase) -> Self {
        self.knowledge_bases
            .write()
            .unwrap()
            .insert(kb.tenant_id.clone(), kb);
        self
    }

    /// Make every `save` wait on `gate`
    pub fn with_save_gate(mut self, gate: Arc<SaveGate>) -> Self {
        self.save_gate = Some(gate);
        self
    }

    pub fn get(&self, tenant_id: &str) -> Option<KnowledgeBase> {
        let tenant_id = TenantId::parse(tenant_id).ok()?;
        self.knowledge_bases.read().unwrap().get(&tenant_id).cloned()
    }

    pub fn count(&self) -> usize {
        self.knowledge_bases.read().unwrap().len()
    }

    /// Number of `load` calls that reached the store
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBaseStore for InMemoryKnowledgeBaseStore {
    async fn load(&self, tenant_id: &TenantId) -> Result<Option<KnowledgeBase>, DomainError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.knowledge_bases.read().unwrap().get(tenant_id).cloned())
    }

    async fn save(&self, kb: &KnowledgeBase) -> Result<(), DomainError> {
        if let Some(gate) = &self.save_gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.knowledge_bases
            .write()
            .unwrap()
            .insert(kb.tenant_id.clone(), kb.clone());
        Ok(())
    }

    async fn delete(&self, tenant_id: &TenantId) -> Result<bool, DomainError> {
        Ok(self.knowledge_bases.write().unwrap().remove(tenant_id).is_some())
    }
}

// ============================================================================
// Mock Embedder
// ============================================================================

/// Deterministic embedder backed by feature hashing, optionally failing
pub struct MockEmbedder {
    inner: HashingEmbedder,
    fail: bool,
    embed_calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            inner: HashingEmbedder::new(MOCK_DIMENSIONS),
            fail: false,
            embed_calls: AtomicUsize::new(0),
        }
    }

    /// An embedder whose every call fails like an unavailable service
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        self.inner.vectorize(text)
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn model(&self) -> &str {
        MOCK_MODEL
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::Api {
                status: 503,
                message: "embedding service unavailable".to_string(),
            });
        }
        Ok(texts.iter().map(|t| self.inner.vectorize(t)).collect())
    }
}
