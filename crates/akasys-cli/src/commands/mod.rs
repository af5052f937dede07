//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `auth` - Login and backend health checks
//! - `dashboard` - Metric cards + insight rendering
//! - `records` - Sales/stock listing
//! - `analyze` - Offline CSV analysis
//! - `transfer` - CSV upload and report email
//! - `serve` - Dashboard server command

pub mod analyze;
pub mod auth;
pub mod dashboard;
pub mod records;
pub mod serve;
pub mod transfer;

// Re-export command functions for main.rs
pub use analyze::*;
pub use auth::*;
pub use dashboard::*;
pub use records::*;
pub use serve::*;
pub use transfer::*;

use anyhow::{Context, Result};

use akasys_core::{BackendClient, Config};

/// Resolve config, applying a `--api-url` override on top of file + env
pub fn resolve_config(api_url: Option<&str>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load config")?;
    if let Some(url) = api_url {
        config.api_url = url.to_string();
    }
    Ok(config)
}

/// Build a client for commands that work with or without a stored token
pub fn open_client(api_url: Option<&str>) -> Result<BackendClient> {
    Ok(BackendClient::from_config(&resolve_config(api_url)?))
}

/// Build a client for commands that require authentication
pub fn open_authed_client(api_url: Option<&str>) -> Result<BackendClient> {
    let client = open_client(api_url)?;
    if !client.is_authenticated() {
        anyhow::bail!("Not logged in. Run 'akasys login --username EMAIL' first.");
    }
    Ok(client)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
