//! Upload and report commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use akasys_core::import::detect_kind;
use akasys_core::insights::InsightEngine;
use akasys_core::models::UploadKind;
use akasys_core::stats::dashboard_stats;

use super::dashboard::{fetch_records, report_body};
use super::open_authed_client;

/// Upload a CSV file for backend ingestion
///
/// The dataset kind is auto-detected from the header when not given.
pub async fn cmd_upload(api_url: Option<&str>, kind: Option<&str>, file: &Path) -> Result<()> {
    let contents =
        fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let kind = match kind {
        Some(k) => k
            .parse::<UploadKind>()
            .map_err(|e| anyhow::anyhow!(e))?,
        None => {
            let header = contents
                .split(|&b| b == b'\n')
                .next()
                .map(String::from_utf8_lossy)
                .unwrap_or_default()
                .into_owned();
            detect_kind(&header).ok_or_else(|| {
                anyhow::anyhow!(
                    "Could not detect dataset from the CSV header; pass --kind vendas|estoque"
                )
            })?
        }
    };

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());

    let client = open_authed_client(api_url)?;
    let response = client
        .upload_csv(kind, &file_name, contents)
        .await
        .context("Upload failed")?;

    println!("✅ Uploaded {} as {} data", response.arquivo, response.tipo);
    println!("   Backend status: {}", response.status);

    Ok(())
}

/// Email a report through the backend
///
/// When no body is given, a dashboard summary is generated from fresh data.
pub async fn cmd_report(
    api_url: Option<&str>,
    to: &str,
    subject: &str,
    body: Option<&str>,
) -> Result<()> {
    let client = open_authed_client(api_url)?;

    let body = match body {
        Some(text) => text.to_string(),
        None => {
            let (sales, stock) = fetch_records(&client, 50).await?;
            let stats = dashboard_stats(&sales, &stock);
            let insights = InsightEngine::new().analyze(&sales, &stock);
            report_body(&stats, &insights)
        }
    };

    let response = client
        .send_report(to, subject, &body)
        .await
        .context("Failed to send report")?;

    println!("📧 Report sent to {}", to);
    println!("   Backend status: {} ({})", response.status, response.msg);

    Ok(())
}
