//! Document domain entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when a document is uploaded without one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Unique identifier for a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document submitted for indexing
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl NewDocument {
    /// Apply upload defaults: missing title becomes "Untitled", missing url is empty
    pub fn new(title: Option<String>, url: Option<String>, content: String) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url: url.unwrap_or_default(),
            content,
        }
    }
}

/// A document as persisted in a knowledge base, with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub title: String,
    pub url: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

impl StoredDocument {
    pub fn from_new(doc: NewDocument, embedding: Vec<f32>) -> Self {
        Self {
            id: DocumentId::new(),
            title: doc.title,
            url: doc.url,
            content: doc.content,
            embedding,
        }
    }

    /// Leading `max_chars` characters of the content
    pub fn snippet(&self, max_chars: usize) -> String {
        self.content.chars().take(max_chars).collect()
    }
}
