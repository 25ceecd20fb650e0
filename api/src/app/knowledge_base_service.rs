//! Knowledge base service
//!
//! Handles uploading, loading, describing and deleting tenant knowledge bases.
//! Recently used knowledge bases are kept in a bounded LRU cache; the cache is
//! refreshed on every write so it never serves an older upload than the one on
//! disk.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, PoisonError};

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::entities::{KnowledgeBase, NewDocument, StoredDocument, TenantId};
use crate::domain::ports::{Embedder, KnowledgeBaseStore};
use crate::error::{AppError, DomainError};

/// Result of a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadSummary {
    pub message: String,
    pub docs_added: usize,
}

/// Metadata about a stored knowledge base
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBaseSummary {
    pub tenant_id: String,
    pub documents: usize,
    pub model: String,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&KnowledgeBase> for KnowledgeBaseSummary {
    fn from(kb: &KnowledgeBase) -> Self {
        Self {
            tenant_id: kb.tenant_id.to_string(),
            documents: kb.len(),
            model: kb.model.clone(),
            dimensions: kb.dimensions,
            created_at: kb.created_at,
        }
    }
}

/// Service for managing tenant knowledge bases
pub struct KnowledgeBaseService<S, E>
where
    S: KnowledgeBaseStore,
    E: Embedder,
{
    store: Arc<S>,
    embedder: Arc<E>,
    cache: Mutex<LruCache<TenantId, Arc<KnowledgeBase>>>,
    /// One lock per tenant with store access in flight. Cache fills and writes
    /// for the same tenant are serialized; other tenants are not blocked.
    tenant_locks: std::sync::Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl<S, E> KnowledgeBaseService<S, E>
where
    S: KnowledgeBaseStore,
    E: Embedder,
{
    pub fn new(store: Arc<S>, embedder: Arc<E>, cache_capacity: NonZeroUsize) -> Self {
        Self {
            store,
            embedder,
            cache: Mutex::new(LruCache::new(cache_capacity)),
            tenant_locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    fn tenant_lock(&self, tenant_id: &TenantId) -> Arc<Mutex<()>> {
        let mut locks = self
            .tenant_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map itself holds an idle lock
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(tenant_id.clone()).or_default().clone()
    }

    async fn cached(&self, tenant_id: &TenantId) -> Option<Arc<KnowledgeBase>> {
        self.cache.lock().await.get(tenant_id).cloned()
    }

    async fn remember(&self, kb: Arc<KnowledgeBase>) {
        let tenant_id = kb.tenant_id.clone();
        let evicted = self.cache.lock().await.push(tenant_id.clone(), kb);
        if let Some((evicted, _)) = evicted.filter(|(id, _)| *id != tenant_id) {
            tracing::debug!(tenant_id = %evicted, "Knowledge base evicted from cache");
        }
    }

    /// Embed `docs` and replace the tenant's knowledge base with them
    pub async fn upload(
        &self,
        tenant_id: &str,
        docs: Vec<NewDocument>,
    ) -> Result<UploadSummary, AppError> {
        if tenant_id.trim().is_empty() || docs.is_empty() {
            return Err(DomainError::Validation("Missing tenant_id or docs".into()).into());
        }
        let tenant_id = TenantId::parse(tenant_id)?;

        let texts: Vec<String> = docs.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != docs.len() {
            return Err(AppError::Internal(format!(
                "Embedder returned {} vectors for {} documents",
                embeddings.len(),
                docs.len()
            )));
        }

        let documents: Vec<StoredDocument> = docs
            .into_iter()
            .zip(embeddings)
            .map(|(doc, embedding)| StoredDocument::from_new(doc, embedding))
            .collect();
        let docs_added = documents.len();

        let kb = KnowledgeBase::new(
            tenant_id.clone(),
            self.embedder.model().to_string(),
            self.embedder.dimensions(),
            documents,
        );

        {
            let lock = self.tenant_lock(&tenant_id);
            let _guard = lock.lock().await;
            self.store.save(&kb).await?;
            self.remember(Arc::new(kb)).await;
        }

        tracing::info!(tenant_id = %tenant_id, docs_added, "Knowledge base uploaded");

        Ok(UploadSummary {
            message: format!("✅ KB uploaded for tenant {}", tenant_id),
            docs_added,
        })
    }

    /// Get a tenant's knowledge base, from cache when possible
    pub async fn load(&self, tenant_id: &TenantId) -> Result<Option<Arc<KnowledgeBase>>, AppError> {
        if let Some(kb) = self.cached(tenant_id).await {
            return Ok(Some(kb));
        }

        let lock = self.tenant_lock(tenant_id);
        let _guard = lock.lock().await;
        // Another request may have filled the cache while we waited
        if let Some(kb) = self.cached(tenant_id).await {
            return Ok(Some(kb));
        }

        let Some(kb) = self.store.load(tenant_id).await? else {
            return Ok(None);
        };
        tracing::debug!(tenant_id = %tenant_id, documents = kb.len(), "Knowledge base loaded from store");

        let kb = Arc::new(kb);
        self.remember(kb.clone()).await;
        Ok(Some(kb))
    }

    /// Get a tenant's knowledge base or fail with the not-found message clients expect
    pub async fn require(&self, tenant_id: &TenantId) -> Result<Arc<KnowledgeBase>, AppError> {
        self.load(tenant_id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("No KB found for tenant {}", tenant_id)).into()
        })
    }

    /// Describe a tenant's knowledge base
    pub async fn describe(&self, tenant_id: &str) -> Result<KnowledgeBaseSummary, AppError> {
        let tenant_id = TenantId::parse(tenant_id)?;
        let kb = self.require(&tenant_id).await?;
        Ok(KnowledgeBaseSummary::from(kb.as_ref()))
    }

    /// Delete a tenant's knowledge base
    pub async fn delete(&self, tenant_id: &str) -> Result<(), AppError> {
        let tenant_id = TenantId::parse(tenant_id)?;

        let existed = {
            let lock = self.tenant_lock(&tenant_id);
            let _guard = lock.lock().await;
            self.cache.lock().await.pop(&tenant_id);
            self.store.delete(&tenant_id).await?
        };

        if !existed {
            return Err(
                DomainError::NotFound(format!("No KB found for tenant {}", tenant_id)).into(),
            );
        }

        tracing::info!(tenant_id = %tenant_id, "Knowledge base deleted");
        Ok(())
    }

    /// The embedder used for uploads
    pub fn embedder(&self) -> &Arc<E> {
        &self.embedder
    }
}
