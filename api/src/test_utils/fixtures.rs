//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::num::NonZeroUsize;

use crate::domain::entities::{KnowledgeBase, NewDocument, StoredDocument, TenantId};

use super::mocks::{MockEmbedder, MOCK_DIMENSIONS, MOCK_MODEL};

/// The default test tenant
pub fn test_tenant() -> TenantId {
    TenantId::parse("acme").unwrap()
}

/// Create a document to upload
pub fn test_document(title: &str, url: &str, content: &str) -> NewDocument {
    NewDocument::new(Some(title.to_string()), Some(url.to_string()), content.to_string())
}

/// A small help-center corpus
pub fn test_documents() -> Vec<NewDocument> {
    vec![
        test_document(
            "Reset your password",
            "https://acme.test/password",
            "Open settings, choose security and follow the password reset link sent by email.",
        ),
        test_document(
            "Billing FAQ",
            "https://acme.test/billing",
            "Invoices are issued monthly. Refunds are processed within five business days.",
        ),
        test_document(
            "Shipping times",
            "https://acme.test/shipping",
            "Orders ship from our warehouse within two days and arrive in about a week.",
        ),
    ]
}

/// Embed documents the way `MockEmbedder` would
pub fn embed_documents(docs: Vec<NewDocument>) -> Vec<StoredDocument> {
    let embedder = MockEmbedder::new();
    docs.into_iter()
        .map(|doc| {
            let embedding = embedder.vectorize(&doc.content);
            StoredDocument::from_new(doc, embedding)
        })
        .collect()
}

/// Knowledge base for `test_tenant()` built from `test_documents()`
pub fn test_knowledge_base() -> KnowledgeBase {
    test_knowledge_base_with(test_documents())
}

/// Knowledge base for `test_tenant()` built from the given documents
pub fn test_knowledge_base_with(docs: Vec<NewDocument>) -> KnowledgeBase {
    KnowledgeBase::new(
        test_tenant(),
        MOCK_MODEL.to_string(),
        MOCK_DIMENSIONS,
        embed_documents(docs),
    )
}

/// Knowledge base built from `test_documents()` for another tenant
pub fn test_knowledge_base_for(tenant_id: &str) -> KnowledgeBase {
    let mut kb = test_knowledge_base();
    kb.tenant_id = TenantId::parse(tenant_id).unwrap();
    kb
}

/// Cache capacity large enough that unit tests never evict
pub fn test_cache_capacity() -> NonZeroUsize {
    NonZeroUsize::new(16).unwrap()
}
