//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod knowledge_bases;
pub mod search;
pub mod upload;

pub use knowledge_bases::{delete_knowledge_base, get_knowledge_base};
pub use search::search;
pub use upload::upload;
