//! Repository port traits
//!
//! These traits define the interface for knowledge base persistence.
//! Implementations are provided by adapters (e.g., the filesystem store).

use async_trait::async_trait;

use crate::domain::entities::{KnowledgeBase, TenantId};
use crate::error::DomainError;

/// Storage for one knowledge base per tenant
#[async_trait]
pub trait KnowledgeBaseStore: Send + Sync {
    /// Load a tenant's knowledge base, `None` if it has never been uploaded
    async fn load(&self, tenant_id: &TenantId) -> Result<Option<KnowledgeBase>, DomainError>;

    /// Persist a knowledge base, replacing any previous one for the tenant
    async fn save(&self, kb: &KnowledgeBase) -> Result<(), DomainError>;

    /// Remove a tenant's knowledge base; returns whether one existed
    async fn delete(&self, tenant_id: &TenantId) -> Result<bool, DomainError>;
}
