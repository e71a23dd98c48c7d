//! Businessmap MCP Server
//!
//! Businessmap (Kanbanize) boards, cards and comments over MCP stdio.
//!
//! # Configuration
//! Set `BUSINESSMAP_API_URL` and `BUSINESSMAP_API_KEY`, or configure in
//! `~/.config/businessmap-mcp/config.toml`. `BUSINESSMAP_READ_ONLY=true`
//! hides every write tool.

use businessmap_mcp::{BusinessMapMcpServer, Config};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("businessmap_mcp")?;

    tracing::info!("Starting Businessmap MCP Server");

    let config = Config::load()?;
    tracing::info!("API URL: {}", config.api.url);

    let server = BusinessMapMcpServer::new(config)?;
    let mode = if server.is_read_only() {
        "Read only"
    } else {
        "All operations available"
    };

    let service = server.serve(stdio()).await?;

    tracing::info!("Businessmap MCP Server running on stdio - {}", mode);
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
