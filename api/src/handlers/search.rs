//! Search handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::domain::entities::SearchHit;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for searching
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// GET /search?tenant_id=...&query=...
///
/// Hybrid fuzzy + semantic search over the tenant's knowledge base.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let hits = state
        .search_service
        .search(
            params.tenant_id.as_deref().unwrap_or_default(),
            params.query.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(hits))
}
