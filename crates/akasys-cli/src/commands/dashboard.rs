//! Dashboard command: metric cards and insights in the terminal

use anyhow::{Context, Result};

use akasys_core::{
    insights::{Insight, InsightEngine, Priority},
    models::{SaleRecord, StockRecord},
    stats::{dashboard_stats, DashboardStats},
    BackendClient,
};

use super::open_authed_client;

/// Fetch both collections and resolve them into typed records
pub(crate) async fn fetch_records(
    client: &BackendClient,
    limit: usize,
) -> Result<(Vec<SaleRecord>, Vec<StockRecord>)> {
    let vendas = client
        .get_vendas(0, limit)
        .await
        .context("Failed to fetch sales")?;
    let estoque = client
        .get_estoque(0, limit)
        .await
        .context("Failed to fetch stock")?;

    let sales = SaleRecord::from_rows(&vendas)?;
    let stock = StockRecord::from_rows(&estoque)?;
    Ok((sales, stock))
}

pub async fn cmd_dashboard(api_url: Option<&str>, limit: usize) -> Result<()> {
    let client = open_authed_client(api_url)?;
    let (sales, stock) = fetch_records(&client, limit).await?;

    let stats = dashboard_stats(&sales, &stock);
    let insights = InsightEngine::new().analyze(&sales, &stock);

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           📊 Akasys Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    print_stats(&stats);
    println!();

    if insights.is_empty() {
        println!("  No insights yet. Upload more data to get analysis.");
    } else {
        println!("  💡 Insights");
        println!("     ─────────────────────────────────────────");
        for insight in &insights {
            print_insight(insight);
        }
    }

    Ok(())
}

fn print_stats(stats: &DashboardStats) {
    println!(
        "  Sales Volume:    {:.1} {}",
        stats.total_volume,
        delta(stats.percent_changes.total_volume)
    );
    println!(
        "  Products:        {} {}",
        stats.total_products,
        delta(stats.percent_changes.total_products)
    );
    println!(
        "  Active Clients:  {} {}",
        stats.active_clients,
        delta(stats.percent_changes.active_clients)
    );
    println!(
        "  Stock on Hand:   {:.1} {}",
        stats.total_stock,
        delta(stats.percent_changes.total_stock)
    );
    println!("  Stock Coverage:  {:.1} days", stats.coverage_days);
}

fn print_insight(insight: &Insight) {
    let icon = match insight.priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "⚪",
    };
    println!("     {} {} [{}]", icon, insight.title, insight.priority);
    println!("        {}", insight.description);
}

fn delta(percent: f64) -> String {
    format!("({:+.1}% vs previous period)", percent)
}

/// Plain-text dashboard summary, used as the default report email body
pub(crate) fn report_body(stats: &DashboardStats, insights: &[Insight]) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "Sales volume: {:.1} ({:+.1}%)\n",
        stats.total_volume, stats.percent_changes.total_volume
    ));
    body.push_str(&format!(
        "Products: {} | Active clients: {}\n",
        stats.total_products, stats.active_clients
    ));
    body.push_str(&format!(
        "Stock on hand: {:.1} covering {:.1} days of demand\n",
        stats.total_stock, stats.coverage_days
    ));

    if !insights.is_empty() {
        body.push('\n');
        for insight in insights {
            body.push_str(&format!(
                "[{}] {}: {}\n",
                insight.priority, insight.title, insight.description
            ));
        }
    }

    body
}
