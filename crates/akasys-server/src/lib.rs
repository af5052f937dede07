//! Akasys Dashboard Server
//!
//! Axum-based REST API between the web UI and the upstream Akasys backend.
//! The backend owns authentication, persistence, and file parsing; this
//! server fetches fresh vendas/estoque pages per request, runs the insight
//! engine and aggregate statistics locally, and serves the results.
//!
//! Security model:
//! - Callers authenticate against the backend (`POST /login` there); this
//!   server only requires a bearer token to be present and passes it
//!   through, so the backend stays the single validator.
//! - Restrictive CORS policy and standard security headers.
//! - Pagination limits clamped server-side.
//! - Sanitized error responses (backend `{detail}` messages pass through,
//!   internal errors do not).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use akasys_core::BackendClient;

mod handlers;

/// Maximum rows per vendas/estoque page, matching the dashboard's fetch cap
pub const MAX_PAGE_LIMIT: usize = 50;

/// Authorization header carrying the backend bearer token
const AUTHORIZATION_HEADER: &str = "authorization";

/// Routes reachable without a token even when auth is required
const PUBLIC_PATHS: &[&str] = &["/api/health", "/wb/chatbot"];

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether a bearer token is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Unauthenticated client for the upstream backend; handlers clone it
    /// with the caller's own token per request
    pub backend: BackendClient,
    pub config: ServerConfig,
}

/// Authentication middleware - requires a bearer token on protected routes
///
/// The token is NOT validated here; it is passed through to the backend,
/// which rejects stale or forged tokens itself. This keeps a single source
/// of auth truth while still failing fast on anonymous requests.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth || PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let has_token = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|auth| auth.starts_with("Bearer "))
        .unwrap_or(false);

    if has_token {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no bearer token");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Extract the caller's bearer token, if any
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(
    backend: BackendClient,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        backend,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::get_health))
        // Dashboard analytics
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/insights", get(handlers::get_insights))
        // Raw records
        .route("/vendas", get(handlers::list_vendas))
        .route("/estoque", get(handlers::list_estoque))
        // User management (proxied to the backend)
        .route("/usuario", post(handlers::create_user))
        .route(
            "/usuario/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Upload & reports (proxied to the backend)
        .route("/upload/:tipo", post(handlers::upload_csv))
        .route("/relatorios/enviar", post(handlers::send_report));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        // Chatbot WebSocket lives outside /api, as the UI expects
        .route("/wb/chatbot", get(handlers::chatbot_ws))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server against the given backend URL
pub async fn serve(
    api_url: &str,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let backend = BackendClient::new(api_url);
    check_backend_connection(&backend).await;

    let app = create_router(backend, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting dashboard server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log backend connection status at startup
async fn check_backend_connection(backend: &BackendClient) {
    if backend.is_reachable().await {
        info!("✅ Backend connected: {}", backend.host());
    } else {
        warn!(
            "⚠️  Backend not responding: {} (the dashboard will return errors until it is up)",
            backend.host()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error, letting backend `{detail}` responses keep their
    /// status while everything else collapses to an opaque 502/500
    pub fn from_backend(err: akasys_core::Error) -> Self {
        match err {
            akasys_core::Error::Backend { status, detail } => Self {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: detail,
                internal: None,
            },
            akasys_core::Error::Http(e) => Self {
                status: StatusCode::BAD_GATEWAY,
                message: "Backend unreachable".to_string(),
                internal: Some(e.into()),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
