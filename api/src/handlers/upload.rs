//! Upload handler
//!
//! Replaces a tenant's knowledge base with a new set of documents.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::app::UploadSummary;
use crate::domain::entities::NewDocument;
use crate::error::AppError;
use crate::AppState;

/// Request body for uploading a knowledge base
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub docs: Option<Vec<UploadDocument>>,
}

/// One document in an upload
#[derive(Debug, Deserialize)]
pub struct UploadDocument {
    /// Defaults to "Untitled"
    pub title: Option<String>,
    /// Defaults to an empty string
    pub url: Option<String>,
    pub content: Option<String>,
}

impl UploadRequest {
    fn into_parts(self) -> Result<(String, Vec<NewDocument>), AppError> {
        let tenant_id = self.tenant_id.unwrap_or_default();
        let docs = self
            .docs
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, doc)| {
                let content = doc
                    .content
                    .ok_or_else(|| AppError::BadRequest(format!("docs[{}] is missing content", i)))?;
                Ok(NewDocument::new(doc.title, doc.url, content))
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok((tenant_id, docs))
    }
}

/// POST /upload
///
/// Embed the documents and store them as the tenant's knowledge base.
pub async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadSummary>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (tenant_id, docs) = request.into_parts()?;

    let summary = state.kb_service.upload(&tenant_id, docs).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_upload_request_with_defaults() {
        let json = r#"{"tenant_id": "acme", "docs": [{"content": "hello"}]}"#;
        let request: UploadRequest = serde_json::from_str(json).unwrap();
        let (tenant_id, docs) = request.into_parts().unwrap();

        assert_eq!(tenant_id, "acme");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Untitled");
        assert_eq!(docs[0].url, "");
        assert_eq!(docs[0].content, "hello");
    }

    #[test]
    fn missing_fields_become_empty() {
        let request: UploadRequest = serde_json::from_str("{}").unwrap();
        let (tenant_id, docs) = request.into_parts().unwrap();
        assert!(tenant_id.is_empty());
        assert!(docs.is_empty());
    }

    #[test]
    fn document_without_content_is_rejected() {
        let json = r#"{"tenant_id": "acme", "docs": [{"content": "ok"}, {"title": "no body"}]}"#;
        let request: UploadRequest = serde_json::from_str(json).unwrap();
        let err = request.into_parts().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "docs[1] is missing content"));
    }
}
