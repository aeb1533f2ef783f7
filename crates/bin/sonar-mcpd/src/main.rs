//! Daemon entry point for the Sonar MCP server.
//!
//! Loads configuration from the environment, builds the Perplexity client,
//! and serves the MCP protocol over stdio and/or streamable HTTP.

mod config;

use std::sync::Arc;

use sonar_core::client::SonarClient;
use sonar_core::control::SonarControlPlane;
use sonar_mcp::server::{self, McpHttpServerConfig};
use tracing_subscriber::EnvFilter;

use crate::config::SonarConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr so the stdio transport stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = SonarConfig::from_args()?;
    let client = SonarClient::new(config.api_key.clone(), config.request_timeout)?
        .with_base_url(config.base_url.clone());
    let control = Arc::new(SonarControlPlane::new(client));

    if config.http_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        if config.enable_stdio {
            let http_control = control.clone();
            tokio::spawn(async move {
                if let Err(err) = server::serve_streamable_http(http_control, http_config).await {
                    tracing::error!("streamable HTTP server exited: {err}");
                }
            });
        } else {
            server::serve_streamable_http(control, http_config).await?;
            return Ok(());
        }
    }

    if config.enable_stdio {
        server::serve_stdio(control).await?;
    }
    Ok(())
}
