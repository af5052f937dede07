//! Data models shared across the Akasys workspace
//!
//! Two layers live here: the wire types matching the backend API's JSON
//! (Portuguese column names, optional numerics) and the typed records the
//! analytics run on. Optional numeric fields are resolved to 0 exactly once,
//! at ingestion, so the rules never re-check for absence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used by the backend (`data` columns)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ========== Backend Wire Types ==========

/// A sales row as the backend serves it from `GET /vendas`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendaRow {
    pub id_venda: i64,
    /// Date in YYYY-MM-DD format
    pub data: String,
    pub cod_cliente: String,
    pub cod_produto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zs_gr_mercad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zs_centro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zs_cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zs_uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Net weight moved by the sale, the volume proxy for all analytics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zs_peso_liquido: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giro_sku_cliente: Option<f64>,
}

/// A stock row as the backend serves it from `GET /estoque`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstoqueRow {
    pub id_estoque: i64,
    /// Date in YYYY-MM-DD format
    pub data: String,
    pub cod_cliente: String,
    pub cod_produto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_centro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dias_em_estoque: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grupo_mercadoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_totalestoque: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

// ========== Typed Analytics Records ==========

/// A sale, resolved from the wire format for the analytics layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub client_code: String,
    pub product_code: String,
    /// Net weight sold; 0 when the backend omitted it
    pub net_weight: f64,
}

impl SaleRecord {
    /// Resolve a wire row into a typed record
    ///
    /// A missing `zs_peso_liquido` becomes 0; an unparseable date is an
    /// error, since the backend contract promises ISO dates.
    pub fn try_from_row(row: &VendaRow) -> Result<Self> {
        Ok(Self {
            date: parse_date(&row.data)?,
            client_code: row.cod_cliente.clone(),
            product_code: row.cod_produto.clone(),
            net_weight: row.zs_peso_liquido.unwrap_or(0.0),
        })
    }

    /// Resolve a batch of wire rows
    pub fn from_rows(rows: &[VendaRow]) -> Result<Vec<Self>> {
        rows.iter().map(Self::try_from_row).collect()
    }
}

/// A stock position, resolved from the wire format for the analytics layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub date: NaiveDate,
    pub client_code: String,
    pub product_code: String,
    /// Units on hand; 0 when the backend omitted it
    pub total_stock: f64,
    /// Age of the position in days; 0 when the backend omitted it
    pub days_in_stock: u32,
}

impl StockRecord {
    pub fn try_from_row(row: &EstoqueRow) -> Result<Self> {
        Ok(Self {
            date: parse_date(&row.data)?,
            client_code: row.cod_cliente.clone(),
            product_code: row.cod_produto.clone(),
            total_stock: row.es_totalestoque.unwrap_or(0.0),
            days_in_stock: row.dias_em_estoque.unwrap_or(0),
        })
    }

    pub fn from_rows(rows: &[EstoqueRow]) -> Result<Vec<Self>> {
        rows.iter().map(Self::try_from_row).collect()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::InvalidData(format!("bad date {:?}: {}", s, e)))
}

// ========== Auth & User Management ==========

/// Response from `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// A backend user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub email: String,
}

/// Payload for `POST /usuario`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUsuario {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

/// Payload for `PUT /usuario/{id}`; only the set fields are updated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUsuario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
}

// ========== Upload, Reports & Health ==========

/// Which dataset a CSV upload targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Vendas,
    Estoque,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Vendas => "vendas",
            UploadKind::Estoque => "estoque",
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UploadKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vendas" => Ok(UploadKind::Vendas),
            "estoque" => Ok(UploadKind::Estoque),
            _ => Err(format!("Unknown upload kind: {} (vendas|estoque)", s)),
        }
    }
}

/// Response from `POST /upload/{tipo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub arquivo: String,
    pub tipo: String,
}

/// Response from `POST /relatorios/enviar`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailResponse {
    pub status: String,
    pub msg: String,
}

/// Response from the backend health check (`GET /`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub msg: String,
}
