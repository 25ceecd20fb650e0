//! Knowledge base handlers
//!
//! Inspect or remove a tenant's stored knowledge base.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::KnowledgeBaseSummary;
use crate::error::AppError;
use crate::AppState;

/// GET /kb/:tenant_id
pub async fn get_knowledge_base(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<Json<KnowledgeBaseSummary>, AppError> {
    Ok(Json(state.kb_service.describe(&tenant_id).await?))
}

/// DELETE /kb/:tenant_id
pub async fn delete_knowledge_base(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.kb_service.delete(&tenant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
