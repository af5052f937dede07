//! Login and health commands

use std::io::{self, Write};

use anyhow::{Context, Result};

use super::{open_client, resolve_config};

/// Log in to the backend and persist the issued token
pub async fn cmd_login(api_url: Option<&str>, username: &str) -> Result<()> {
    let mut config = resolve_config(api_url)?;
    let client = akasys_core::BackendClient::new(&config.api_url);

    print!("Password for {}: ", username);
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    let login = client
        .login(username, password)
        .await
        .context("Login failed")?;

    config.token = Some(login.access_token);
    let path = config.save().context("Failed to save config")?;

    println!();
    println!("✅ Logged in to {}", config.api_url);
    println!("   Token stored in {}", path.display());

    Ok(())
}

/// Check backend connectivity
pub async fn cmd_health(api_url: Option<&str>) -> Result<()> {
    let client = open_client(api_url)?;

    match client.health_check().await {
        Ok(health) => {
            println!("✅ Backend online at {}", client.host());
            println!("   {} ({})", health.msg, health.status);
        }
        Err(e) => {
            println!("❌ Backend unreachable at {}", client.host());
            println!("   {}", e);
        }
    }

    Ok(())
}
