//! Adapters layer
//!
//! Implementations of port traits for embedding providers and storage.

pub mod embedding;
pub mod filesystem;

pub use embedding::EmbeddingBackend;
pub use filesystem::FileKnowledgeBaseStore;
