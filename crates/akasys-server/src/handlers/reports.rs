//! Upload and report handlers - proxied to the backend

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use akasys_core::models::{EmailResponse, UploadKind, UploadResponse};

use crate::{AppError, AppState};

use super::backend_for;

/// Maximum accepted CSV upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// POST /api/upload/:tipo - Forward a CSV file to the backend for ingestion
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    Path(tipo): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let kind: UploadKind = tipo
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("Malformed multipart body"))?
    {
        if field.name() == Some("file") {
            let name = field
                .file_name()
                .unwrap_or("upload.csv")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::bad_request("Failed to read upload"))?;
            file = Some((name, data.to_vec()));
        }
    }

    let (file_name, contents) =
        file.ok_or_else(|| AppError::bad_request("Missing 'file' field"))?;

    if contents.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::bad_request("File exceeds the 10 MB upload limit"));
    }
    if contents.is_empty() {
        return Err(AppError::bad_request("Empty file"));
    }

    tracing::info!(kind = kind.as_str(), file = %file_name, bytes = contents.len(), "Forwarding upload");

    let client = backend_for(&state, &headers);
    let response = client
        .upload_csv(kind, &file_name, contents)
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(response))
}

/// Query parameters for report sending, as the backend expects them
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub assunto: String,
    pub corpo: String,
}

/// Request body for report sending
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub email: String,
}

/// POST /api/relatorios/enviar - Ask the backend to email a report
pub async fn send_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
    headers: HeaderMap,
    Json(body): Json<ReportRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    if body.email.trim().is_empty() || !body.email.contains('@') {
        return Err(AppError::bad_request("Invalid recipient email"));
    }

    let client = backend_for(&state, &headers);
    let response = client
        .send_report(&body.email, &params.assunto, &params.corpo)
        .await
        .map_err(AppError::from_backend)?;
    Ok(Json(response))
}
