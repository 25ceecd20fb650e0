//! Domain layer
//!
//! Knowledge base model with no HTTP or storage concerns.
//! - `entities`: tenants, documents, knowledge bases and search hits
//! - `ports`: traits for embedding and persistence

pub mod entities;
pub mod ports;
