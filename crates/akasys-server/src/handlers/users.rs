//! User management handlers - proxied to the backend's admin routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use akasys_core::models::{CreateUsuario, UpdateUsuario, Usuario};

use crate::{AppError, AppState, SuccessResponse};

use super::backend_for;

/// POST /api/usuario - Register a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateUsuario>,
) -> Result<Json<Usuario>, AppError> {
    if body.email.trim().is_empty() || !body.email.contains('@') {
        return Err(AppError::bad_request("Invalid email address"));
    }
    if body.senha.len() < 4 {
        return Err(AppError::bad_request("Password too short"));
    }

    let client = backend_for(&state, &headers);
    let user = client
        .create_user(&body)
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(user))
}

/// GET /api/usuario/:id - Fetch a user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Usuario>, AppError> {
    let client = backend_for(&state, &headers);
    let user = client.get_user(id).await.map_err(AppError::from_backend)?;
    Ok(Json(user))
}

/// PUT /api/usuario/:id - Update a user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateUsuario>,
) -> Result<Json<Usuario>, AppError> {
    let client = backend_for(&state, &headers);
    let user = client
        .update_user(id, &body)
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(user))
}

/// DELETE /api/usuario/:id - Remove a user
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let client = backend_for(&state, &headers);
    client
        .delete_user(id)
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(SuccessResponse { success: true }))
}
