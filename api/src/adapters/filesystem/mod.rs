//! Filesystem adapter
//!
//! Stores knowledge bases as JSON files on local disk.

pub mod store;

pub use store::FileKnowledgeBaseStore;
