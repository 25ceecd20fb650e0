//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the search algorithms.

pub mod fuzzy;
pub mod knowledge_base_service;
pub mod search_config;
pub mod search_service;

pub use knowledge_base_service::{KnowledgeBaseService, KnowledgeBaseSummary, UploadSummary};
pub use search_service::SearchService;
