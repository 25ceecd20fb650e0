//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod embedding;
pub mod repositories;

pub use embedding::Embedder;
pub use repositories::KnowledgeBaseStore;
