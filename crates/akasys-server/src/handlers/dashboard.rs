//! Dashboard analytics handlers
//!
//! Both endpoints fetch fresh pages from the backend on every request and
//! recompute from scratch; there is no cache, so a newer request simply
//! supersedes an older one (last-write-wins).

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use akasys_core::{
    insights::{Insight, InsightEngine},
    models::{SaleRecord, StockRecord},
    stats::{dashboard_stats, DashboardStats},
    BackendClient,
};

use crate::{AppError, AppState, MAX_PAGE_LIMIT};

use super::backend_for;

/// Query parameters for the analytics endpoints
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Rows to fetch per collection (clamped to the page cap)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    MAX_PAGE_LIMIT
}

/// Fetch both collections and resolve them into typed records
async fn fetch_records(
    client: &BackendClient,
    limit: usize,
) -> Result<(Vec<SaleRecord>, Vec<StockRecord>), AppError> {
    let limit = limit.min(MAX_PAGE_LIMIT);

    let (vendas, estoque) = tokio::try_join!(client.get_vendas(0, limit), client.get_estoque(0, limit))
        .map_err(AppError::from_backend)?;

    let sales = SaleRecord::from_rows(&vendas).map_err(AppError::from_backend)?;
    let stock = StockRecord::from_rows(&estoque).map_err(AppError::from_backend)?;
    Ok((sales, stock))
}

/// GET /api/dashboard - Aggregate metric cards
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, AppError> {
    let client = backend_for(&state, &headers);
    let (sales, stock) = fetch_records(&client, params.limit).await?;

    Ok(Json(dashboard_stats(&sales, &stock)))
}

/// GET /api/insights - Ranked insight list for the dashboard sidebar
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Insight>>, AppError> {
    let client = backend_for(&state, &headers);
    let (sales, stock) = fetch_records(&client, params.limit).await?;

    let insights = InsightEngine::new().analyze(&sales, &stock);
    tracing::debug!(count = insights.len(), "Computed insights");

    Ok(Json(insights))
}

/// GET /api/health - Server liveness plus backend reachability
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let backend_online = state.backend.is_reachable().await;
    Json(serde_json::json!({
        "status": "ok",
        "backend": if backend_online { "online" } else { "offline" },
    }))
}
