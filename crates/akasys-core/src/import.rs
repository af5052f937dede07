//! CSV ingestion for local vendas/estoque exports
//!
//! Parses the same column layout the backend ingests on upload, so a file
//! can be analyzed offline before (or instead of) being uploaded. Column
//! names match the backend schema; optional numeric columns default to 0 at
//! ingestion like every other record source.

use std::io::Read;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{SaleRecord, StockRecord, UploadKind, DATE_FORMAT};

/// Detect which dataset a CSV header line belongs to
///
/// Returns None when the header matches neither layout.
pub fn detect_kind(header: &str) -> Option<UploadKind> {
    let columns: Vec<&str> = header.trim().split(',').map(str::trim).collect();

    if columns.contains(&"es_totalestoque") || columns.contains(&"dias_em_estoque") {
        return Some(UploadKind::Estoque);
    }
    if columns.contains(&"zs_peso_liquido") {
        return Some(UploadKind::Vendas);
    }
    None
}

#[derive(Debug, Deserialize)]
struct VendaCsvRow {
    data: String,
    cod_cliente: String,
    cod_produto: String,
    #[serde(default)]
    zs_peso_liquido: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EstoqueCsvRow {
    data: String,
    cod_cliente: String,
    cod_produto: String,
    #[serde(default)]
    dias_em_estoque: Option<u32>,
    #[serde(default)]
    es_totalestoque: Option<f64>,
}

/// Parse a vendas CSV export into sale records
pub fn parse_vendas_csv<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();

    for (line, row) in csv_reader.deserialize::<VendaCsvRow>().enumerate() {
        let row = row?;
        records.push(SaleRecord {
            date: parse_csv_date(&row.data, line)?,
            client_code: row.cod_cliente,
            product_code: row.cod_produto,
            net_weight: row.zs_peso_liquido.unwrap_or(0.0),
        });
    }

    debug!(count = records.len(), "Parsed vendas CSV");
    Ok(records)
}

/// Parse an estoque CSV export into stock records
pub fn parse_estoque_csv<R: Read>(reader: R) -> Result<Vec<StockRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();

    for (line, row) in csv_reader.deserialize::<EstoqueCsvRow>().enumerate() {
        let row = row?;
        records.push(StockRecord {
            date: parse_csv_date(&row.data, line)?,
            client_code: row.cod_cliente,
            product_code: row.cod_produto,
            total_stock: row.es_totalestoque.unwrap_or(0.0),
            days_in_stock: row.dias_em_estoque.unwrap_or(0),
        });
    }

    debug!(count = records.len(), "Parsed estoque CSV");
    Ok(records)
}

fn parse_csv_date(raw: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::InvalidData(format!("row {}: bad date {:?}: {}", line + 1, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENDAS_CSV: &str = "\
data,cod_cliente,cod_produto,zs_peso_liquido
2024-01-01,C1,P1,100.5
2024-01-02,C2,P1,
2024-01-02,C1,P2,49.5
";

    const ESTOQUE_CSV: &str = "\
data,cod_cliente,cod_produto,dias_em_estoque,es_totalestoque
2024-01-05,C1,P1,25,40.0
2024-01-05,C2,P2,,
";

    #[test]
    fn test_parse_vendas_defaults_missing_weight() {
        let records = parse_vendas_csv(VENDAS_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].net_weight, 100.5);
        assert_eq!(records[1].net_weight, 0.0);
        assert_eq!(records[2].product_code, "P2");
    }

    #[test]
    fn test_parse_estoque_defaults_missing_numerics() {
        let records = parse_estoque_csv(ESTOQUE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].days_in_stock, 25);
        assert_eq!(records[1].days_in_stock, 0);
        assert_eq!(records[1].total_stock, 0.0);
    }

    #[test]
    fn test_bad_date_reports_row() {
        let csv = "data,cod_cliente,cod_produto,zs_peso_liquido\n15/01/2024,C1,P1,1.0\n";
        let err = parse_vendas_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_detect_kind_from_header() {
        assert_eq!(
            detect_kind("data,cod_cliente,cod_produto,zs_peso_liquido"),
            Some(UploadKind::Vendas)
        );
        assert_eq!(
            detect_kind("data,cod_cliente,cod_produto,dias_em_estoque,es_totalestoque"),
            Some(UploadKind::Estoque)
        );
        assert_eq!(detect_kind("id,name,value"), None);
    }
}
