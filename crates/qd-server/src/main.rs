//! Quivly docs MCP server — stdio entry point.

mod config;

use anyhow::Context;
use clap::Parser;
use config::{Cli, ServerConfig};
use qd_mcp::transport::serve_stdio;
use qd_mcp::McpServer;
use qd_store::{ContentStore, Corpus};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::resolve(&cli)?;
    init_tracing(&config.log_level);

    let store = load_store(&config)?;
    let server = McpServer::with_options(Arc::new(store), config.search_options())
        .with_server_info(&config.name, &config.version);

    tracing::info!(
        "{} {} running on stdio ({} tools)",
        config.name,
        config.version,
        server.tool_count()
    );

    serve_stdio(&server).await.context("stdio transport failed")?;
    Ok(())
}

/// Logs go to stderr; stdout belongs to the protocol.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(config: &ServerConfig) -> anyhow::Result<ContentStore> {
    match &config.corpus_path {
        Some(path) => {
            tracing::info!("Loading corpus from {}", path.display());
            ContentStore::load(path, config.load_limits())
                .with_context(|| format!("Failed to load corpus {}", path.display()))
        }
        None => {
            tracing::info!("Using bundled corpus");
            ContentStore::build(Corpus::bundled()?, config.load_limits())
                .context("Bundled corpus failed validation")
        }
    }
}
