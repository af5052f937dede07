//! Raw record handlers - paginated vendas/estoque passthrough

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use akasys_core::models::{EstoqueRow, VendaRow};

use crate::{AppError, AppState, MAX_PAGE_LIMIT};

use super::backend_for;

/// Pagination query parameters, mirroring the backend's `skip`/`limit`
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    MAX_PAGE_LIMIT
}

/// GET /api/vendas - List sales rows
pub async fn list_vendas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<VendaRow>>, AppError> {
    let client = backend_for(&state, &headers);
    let rows = client
        .get_vendas(params.skip, params.limit.min(MAX_PAGE_LIMIT))
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(rows))
}

/// GET /api/estoque - List stock rows
pub async fn list_estoque(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<EstoqueRow>>, AppError> {
    let client = backend_for(&state, &headers);
    let rows = client
        .get_estoque(params.skip, params.limit.min(MAX_PAGE_LIMIT))
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(rows))
}
