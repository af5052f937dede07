//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod chat;
pub mod dashboard;
pub mod records;
pub mod reports;
pub mod users;

// Re-export all handlers for use in router
pub use chat::*;
pub use dashboard::*;
pub use records::*;
pub use reports::*;
pub use users::*;

use axum::http::HeaderMap;

use akasys_core::BackendClient;

use crate::{bearer_token, AppState};

/// Build a backend client carrying the caller's bearer token, if present
///
/// Anonymous requests only reach handlers when auth is disabled; the mock
/// backend used in development accepts them.
pub(crate) fn backend_for(state: &AppState, headers: &HeaderMap) -> BackendClient {
    match bearer_token(headers) {
        Some(token) => state.backend.with_token(token),
        None => state.backend.clone(),
    }
}
