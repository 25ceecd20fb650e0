//! Search result entity

use serde::Serialize;

use super::{DocumentId, StoredDocument};

/// Which retriever produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitSource {
    Fuzzy,
    Semantic,
}

/// One ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(skip)]
    pub document_id: DocumentId,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub score: f64,
    pub source: HitSource,
}

impl SearchHit {
    pub fn new(doc: &StoredDocument, snippet_chars: usize, score: f64, source: HitSource) -> Self {
        Self {
            document_id: doc.id,
            title: doc.title.clone(),
            url: doc.url.clone(),
            snippet: doc.snippet(snippet_chars),
            score,
            source,
        }
    }

    /// Key used to collapse duplicate results
    ///
    /// Documents without a url are keyed by their own id.
    pub fn dedup_key(&self) -> String {
        if self.url.is_empty() {
            format!("doc:{}", self.document_id)
        } else {
            self.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewDocument;

    #[test]
    fn serializes_without_document_id() {
        let doc = StoredDocument::from_new(
            NewDocument::new(Some("Guide".into()), Some("https://x/guide".into()), "text".into()),
            vec![],
        );
        let hit = SearchHit::new(&doc, 200, 180.0, HitSource::Fuzzy);
        let json = serde_json::to_value(&hit).unwrap();

        assert_eq!(json["title"], "Guide");
        assert_eq!(json["url"], "https://x/guide");
        assert_eq!(json["snippet"], "text");
        assert_eq!(json["score"], 180.0);
        assert_eq!(json["source"], "fuzzy");
        assert!(json.get("document_id").is_none());
    }

    #[test]
    fn dedup_key_falls_back_to_document_id() {
        let a = StoredDocument::from_new(NewDocument::new(None, None, "a".into()), vec![]);
        let b = StoredDocument::from_new(NewDocument::new(None, None, "b".into()), vec![]);
        let hit_a = SearchHit::new(&a, 200, 1.0, HitSource::Semantic);
        let hit_b = SearchHit::new(&b, 200, 1.0, HitSource::Semantic);
        assert_ne!(hit_a.dedup_key(), hit_b.dedup_key());
    }
}
