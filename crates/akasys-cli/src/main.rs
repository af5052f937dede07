//! Akasys CLI - sales & inventory dashboard client
//!
//! Usage:
//!   akasys login --username EMAIL     Log in and store the access token
//!   akasys dashboard                  Show metric cards and insights
//!   akasys analyze --sales FILE       Analyze a local CSV export
//!   akasys serve --port 3000          Start the dashboard server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Login { username } => commands::cmd_login(cli.api_url.as_deref(), &username).await,
        Commands::Dashboard { limit } => {
            commands::cmd_dashboard(cli.api_url.as_deref(), limit).await
        }
        Commands::Sales { skip, limit } => {
            commands::cmd_sales(cli.api_url.as_deref(), skip, limit).await
        }
        Commands::Stock { skip, limit } => {
            commands::cmd_stock(cli.api_url.as_deref(), skip, limit).await
        }
        Commands::Analyze { sales, stock, json } => {
            commands::cmd_analyze(sales.as_deref(), stock.as_deref(), json)
        }
        Commands::Upload { kind, file } => {
            commands::cmd_upload(cli.api_url.as_deref(), kind.as_deref(), &file).await
        }
        Commands::Report { to, subject, body } => {
            commands::cmd_report(cli.api_url.as_deref(), &to, &subject, body.as_deref()).await
        }
        Commands::Health => commands::cmd_health(cli.api_url.as_deref()).await,
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                cli.api_url.as_deref(),
                &host,
                port,
                no_auth,
                static_dir.as_deref(),
            )
            .await
        }
    }
}
