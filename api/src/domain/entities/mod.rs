//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod document;
pub mod knowledge_base;
pub mod search_hit;
pub mod tenant;

pub use document::{DocumentId, NewDocument, StoredDocument};
pub use knowledge_base::{normalize, KnowledgeBase};
pub use search_hit::{HitSource, SearchHit};
pub use tenant::TenantId;
