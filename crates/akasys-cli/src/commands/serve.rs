//! Dashboard server command

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use akasys_server::ServerConfig;

use super::resolve_config;

pub async fn cmd_serve(
    api_url: Option<&str>,
    host: &str,
    port: u16,
    no_auth: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(api_url)?;

    if no_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let server_config = ServerConfig {
        require_auth: !no_auth,
        ..Default::default()
    };

    let static_dir = static_dir.map(|p| p.to_string_lossy().into_owned());

    akasys_server::serve(
        &config.api_url,
        host,
        port,
        static_dir.as_deref(),
        server_config,
    )
    .await
}
