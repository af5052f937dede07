//! HTTP client for the upstream Akasys backend
//!
//! Thin typed wrapper over the backend's REST API: login, user management,
//! paginated vendas/estoque reads, CSV upload, report email, and the health
//! check. All business logic lives behind these routes; this client only
//! shapes requests and surfaces the backend's `{detail}` error messages.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    CreateUsuario, EmailResponse, EstoqueRow, HealthResponse, LoginResponse, UpdateUsuario,
    UploadKind, UploadResponse, Usuario, VendaRow,
};

/// Default page size for vendas/estoque reads, matching the dashboard's cap
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Error body the backend returns on failed requests
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// Client for the Akasys backend REST API
#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    /// Create an unauthenticated client
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a copy of this client carrying a bearer token
    ///
    /// Used per request by the dashboard server, which passes each caller's
    /// own token through to the backend.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    /// Create from environment variables (`AKASYS_API_URL`, `AKASYS_API_TOKEN`)
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("AKASYS_API_URL").ok()?;
        let mut client = Self::new(&base_url);
        if let Ok(token) = std::env::var("AKASYS_API_TOKEN") {
            client.token = Some(token);
        }
        Some(client)
    }

    /// Create from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(&config.api_url);
        client.token = config.token.clone();
        client
    }

    /// Base URL this client talks to
    pub fn host(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is attached
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a backend response to a typed value, surfacing `{detail}` errors
    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| format!("HTTP {}", status));

        Err(Error::Backend {
            status: status.as_u16(),
            detail,
        })
    }

    async fn check_empty(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let detail = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        Err(Error::Backend {
            status: status.as_u16(),
            detail,
        })
    }

    // ========== Authentication ==========

    /// Log in and return the issued bearer token
    ///
    /// The backend expects OAuth2-style form fields, not JSON.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .http_client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let login: LoginResponse = Self::check(response).await?;
        debug!(token_type = %login.token_type, "Login succeeded");
        Ok(login)
    }

    // ========== User Management ==========

    /// Register a new user (no auth required)
    pub async fn create_user(&self, user: &CreateUsuario) -> Result<Usuario> {
        let response = self
            .http_client
            .post(self.url("/usuario"))
            .json(user)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Usuario> {
        let response = self
            .authed(self.http_client.get(self.url(&format!("/usuario/{}", user_id))))
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn update_user(&self, user_id: i64, update: &UpdateUsuario) -> Result<Usuario> {
        let response = self
            .authed(self.http_client.put(self.url(&format!("/usuario/{}", user_id))))
            .json(update)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        let response = self
            .authed(
                self.http_client
                    .delete(self.url(&format!("/usuario/{}", user_id))),
            )
            .send()
            .await?;
        Self::check_empty(response).await
    }

    // ========== Data Reads ==========

    /// Fetch a page of sales rows
    pub async fn get_vendas(&self, skip: usize, limit: usize) -> Result<Vec<VendaRow>> {
        let response = self
            .authed(self.http_client.get(self.url("/vendas")))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        Self::check(response).await
    }

    /// Fetch a page of stock rows
    pub async fn get_estoque(&self, skip: usize, limit: usize) -> Result<Vec<EstoqueRow>> {
        let response = self
            .authed(self.http_client.get(self.url("/estoque")))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        Self::check(response).await
    }

    // ========== Upload & Reports ==========

    /// Upload a vendas/estoque CSV for backend ingestion
    pub async fn upload_csv(
        &self,
        kind: UploadKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .authed(
                self.http_client
                    .post(self.url(&format!("/upload/{}", kind.as_str()))),
            )
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await
    }

    /// Ask the backend to email a report
    pub async fn send_report(
        &self,
        email: &str,
        assunto: &str,
        corpo: &str,
    ) -> Result<EmailResponse> {
        let response = self
            .authed(self.http_client.post(self.url("/relatorios/enviar")))
            .query(&[("assunto", assunto), ("corpo", corpo)])
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        Self::check(response).await
    }

    // ========== Health ==========

    /// Backend health check (`GET /`, no auth)
    pub async fn health_check(&self) -> Result<HealthResponse> {
        let response = self.http_client.get(self.url("/")).send().await?;
        Self::check(response).await
    }

    /// True when the backend answers its health check
    pub async fn is_reachable(&self) -> bool {
        self.health_check().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.host(), "http://localhost:8000");
        assert_eq!(client.url("/vendas"), "http://localhost:8000/vendas");
    }

    #[test]
    fn test_with_token_marks_authenticated() {
        let client = BackendClient::new("http://localhost:8000");
        assert!(!client.is_authenticated());
        assert!(client.with_token("abc").is_authenticated());
    }
}
