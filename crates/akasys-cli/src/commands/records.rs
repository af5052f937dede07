//! Sales/stock listing commands

use anyhow::{Context, Result};

use super::{open_authed_client, truncate};

pub async fn cmd_sales(api_url: Option<&str>, skip: usize, limit: usize) -> Result<()> {
    let client = open_authed_client(api_url)?;
    let rows = client
        .get_vendas(skip, limit)
        .await
        .context("Failed to fetch sales")?;

    if rows.is_empty() {
        println!("No sales records. Upload data with:");
        println!("  akasys upload --kind vendas --file vendas.csv");
        return Ok(());
    }

    println!();
    println!("📈 Sales ({} rows, skip {})", rows.len(), skip);
    println!("   ──────────────────────────────────────────────────────");
    println!("   {:<12} {:<10} {:<14} {:>12}", "Date", "Client", "Product", "Net Weight");

    for row in &rows {
        let product = row.produto.as_deref().unwrap_or(&row.cod_produto);
        println!(
            "   {:<12} {:<10} {:<14} {:>12}",
            row.data,
            truncate(&row.cod_cliente, 10),
            truncate(product, 14),
            row.zs_peso_liquido
                .map(|w| format!("{:.1}", w))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}

pub async fn cmd_stock(api_url: Option<&str>, skip: usize, limit: usize) -> Result<()> {
    let client = open_authed_client(api_url)?;
    let rows = client
        .get_estoque(skip, limit)
        .await
        .context("Failed to fetch stock")?;

    if rows.is_empty() {
        println!("No stock records. Upload data with:");
        println!("  akasys upload --kind estoque --file estoque.csv");
        return Ok(());
    }

    println!();
    println!("📦 Stock ({} rows, skip {})", rows.len(), skip);
    println!("   ──────────────────────────────────────────────────────");
    println!("   {:<12} {:<10} {:<14} {:>8} {:>10}", "Date", "Client", "Product", "Days", "Units");

    for row in &rows {
        let product = row.produto.as_deref().unwrap_or(&row.cod_produto);
        println!(
            "   {:<12} {:<10} {:<14} {:>8} {:>10}",
            row.data,
            truncate(&row.cod_cliente, 10),
            truncate(product, 14),
            row.dias_em_estoque.unwrap_or(0),
            row.es_totalestoque
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}
