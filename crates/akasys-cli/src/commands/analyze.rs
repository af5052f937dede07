//! Offline analysis of local CSV exports

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use akasys_core::{
    import::{parse_estoque_csv, parse_vendas_csv},
    insights::InsightEngine,
    stats::dashboard_stats,
};

/// Run the engine over local CSV files, no backend involved
pub fn cmd_analyze(sales_file: Option<&Path>, stock_file: Option<&Path>, json: bool) -> Result<()> {
    if sales_file.is_none() && stock_file.is_none() {
        anyhow::bail!("Provide at least one of --sales or --stock");
    }

    let sales = match sales_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parse_vendas_csv(file).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => vec![],
    };

    let stock = match stock_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parse_estoque_csv(file).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => vec![],
    };

    let stats = dashboard_stats(&sales, &stock);
    let insights = InsightEngine::new().analyze(&sales, &stock);

    if json {
        let output = serde_json::json!({
            "stats": stats,
            "insights": insights,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("🔍 Offline Analysis");
    println!("   ─────────────────────────────────────────");
    println!("   Sales rows: {}   Stock rows: {}", sales.len(), stock.len());
    println!();
    println!("   Sales Volume:   {:.1}", stats.total_volume);
    println!("   Products:       {}", stats.total_products);
    println!("   Active Clients: {}", stats.active_clients);
    println!("   Stock on Hand:  {:.1}", stats.total_stock);
    println!("   Coverage:       {:.1} days", stats.coverage_days);
    println!();

    if insights.is_empty() {
        println!("   No insights from this dataset.");
    } else {
        for insight in &insights {
            println!("   [{}] {}", insight.priority, insight.title);
            println!("       {}", insight.description);
        }
    }

    Ok(())
}
