//! Test utilities for akasys-core
//!
//! Provides a mock of the upstream Akasys backend that serves the same
//! routes the real one does (login, vendas/estoque pagination, upload,
//! reports, health) against in-memory fixture data. Used by the core
//! integration tests and the dashboard server tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::sync::oneshot;

use crate::models::{EstoqueRow, VendaRow};

/// Bearer token the mock backend issues and accepts
pub const MOCK_TOKEN: &str = "mock-access-token";
/// Credentials the mock backend accepts on `POST /login`
pub const MOCK_USER: &str = "admin@akasys.test";
pub const MOCK_PASSWORD: &str = "s3nha";

struct MockState {
    vendas: Vec<VendaRow>,
    estoque: Vec<EstoqueRow>,
}

/// Mock Akasys backend for testing and development
pub struct MockBackendServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackendServer {
    /// Start the mock backend with the default seeded dataset
    pub async fn start() -> Self {
        Self::start_with(seed_vendas(), seed_estoque()).await
    }

    /// Start the mock backend with explicit fixture rows
    pub async fn start_with(vendas: Vec<VendaRow>, estoque: Vec<EstoqueRow>) -> Self {
        let state = Arc::new(MockState { vendas, estoque });

        let app = Router::new()
            .route("/", get(handle_health))
            .route("/login", post(handle_login))
            .route("/usuario", post(handle_create_user))
            .route(
                "/usuario/:id",
                get(handle_get_user)
                    .put(handle_update_user)
                    .delete(handle_delete_user),
            )
            .route("/vendas", get(handle_vendas))
            .route("/estoque", get(handle_estoque))
            .route("/upload/:tipo", post(handle_upload))
            .route("/relatorios/enviar", post(handle_send_report))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Default vendas fixture: 14 sale days, the recent seven 50% heavier,
/// volume concentrated on one product and one client
pub fn seed_vendas() -> Vec<VendaRow> {
    let mut rows = Vec::new();
    for day in 1..=14u32 {
        let weight = if day > 7 { 150.0 } else { 100.0 };
        rows.push(venda_row(
            day as i64,
            &format!("2024-01-{:02}", day),
            if day % 3 == 0 { "CLI002" } else { "CLI001" },
            if day % 4 == 0 { "PRD002" } else { "PRD001" },
            weight,
        ));
    }
    rows
}

/// Default estoque fixture: 10 positions, six past the aging threshold
pub fn seed_estoque() -> Vec<EstoqueRow> {
    (0..10u32)
        .map(|i| EstoqueRow {
            id_estoque: i as i64 + 1,
            data: "2024-01-14".to_string(),
            cod_cliente: "CLI001".to_string(),
            cod_produto: if i % 2 == 0 { "PRD001" } else { "PRD002" }.to_string(),
            es_centro: None,
            tipo_material: None,
            origem: None,
            lote: None,
            dias_em_estoque: Some(if i < 6 { 25 } else { 5 }),
            produto: None,
            grupo_mercadoria: None,
            es_totalestoque: Some(40.0),
            sku: None,
        })
        .collect()
}

fn venda_row(id: i64, data: &str, cliente: &str, produto: &str, peso: f64) -> VendaRow {
    VendaRow {
        id_venda: id,
        data: data.to_string(),
        cod_cliente: cliente.to_string(),
        cod_produto: produto.to_string(),
        lote: None,
        origem: None,
        zs_gr_mercad: None,
        produto: None,
        zs_centro: None,
        zs_cidade: None,
        zs_uf: None,
        sku: None,
        zs_peso_liquido: Some(peso),
        giro_sku_cliente: None,
    }
}

// ========== Handlers ==========

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "msg": "API online" }))
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn handle_login(Form(form): Form<LoginForm>) -> impl IntoResponse {
    if form.username == MOCK_USER && form.password == MOCK_PASSWORD {
        Json(serde_json::json!({
            "access_token": MOCK_TOKEN,
            "token_type": "bearer"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "Credenciais inválidas" })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
struct Pagination {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

fn page<T: Clone>(rows: &[T], pagination: &Pagination) -> Vec<T> {
    rows.iter()
        .skip(pagination.skip)
        .take(pagination.limit)
        .cloned()
        .collect()
}

async fn handle_vendas(
    State(state): State<Arc<MockState>>,
    Query(pagination): Query<Pagination>,
) -> Json<Vec<VendaRow>> {
    Json(page(&state.vendas, &pagination))
}

async fn handle_estoque(
    State(state): State<Arc<MockState>>,
    Query(pagination): Query<Pagination>,
) -> Json<Vec<EstoqueRow>> {
    Json(page(&state.estoque, &pagination))
}

#[derive(Deserialize)]
struct CreateUserBody {
    nome: String,
    email: String,
    #[allow(dead_code)]
    senha: String,
}

async fn handle_create_user(Json(body): Json<CreateUserBody>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "id": 1, "nome": body.nome, "email": body.email }))
}

async fn handle_get_user(Path(id): Path<i64>) -> impl IntoResponse {
    if id == 1 {
        Json(serde_json::json!({ "id": 1, "nome": "Admin", "email": MOCK_USER })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "detail": "Usuário não encontrado" })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
struct UpdateUserBody {
    nome: Option<String>,
    email: Option<String>,
}

async fn handle_update_user(
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserBody>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": id,
        "nome": body.nome.unwrap_or_else(|| "Admin".to_string()),
        "email": body.email.unwrap_or_else(|| MOCK_USER.to_string()),
    }))
}

async fn handle_delete_user(Path(_id): Path<i64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn handle_upload(Path(tipo): Path<String>) -> impl IntoResponse {
    if tipo == "vendas" || tipo == "estoque" {
        Json(serde_json::json!({
            "status": "ok",
            "arquivo": "upload.csv",
            "tipo": tipo
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "detail": "Tipo de upload inválido" })),
        )
            .into_response()
    }
}

async fn handle_send_report() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "msg": "Relatório enviado" }))
}
