//! athena-mcp — MCP server exposing AWS Athena query tools over stdio.
//!
//! Tools served:
//! - `list_databases` — data catalog listing
//! - `query_athena` — SQL execution with submit/poll/fetch
//! - `describe_data_structure` — table listing for a database

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use athena_mcp::server::McpServer;
use athena_mcp::transport::StdioTransport;
use athena_service::{AthenaConfig, AthenaError, AthenaService, AwsAthenaApi};
use athena_tools::{register_athena_tools, ToolRegistry};

// ── CLI ─────────────────────────────────────────────────────────────

/// MCP server for AWS Athena queries.
#[derive(Parser, Debug)]
#[command(name = "athena-mcp", version, about)]
struct Cli {
    /// Log filter directive (e.g. "info" or "athena_service=debug").
    #[arg(long, env = "ATHENA_MCP_LOG", default_value = "info")]
    log: String,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let config = AthenaConfig::from_env();
    info!(
        region = %config.region,
        database = %config.default_database,
        "starting athena-mcp"
    );

    let service = initialize_service(&config).await;

    let mut registry = ToolRegistry::new();
    register_athena_tools(&mut registry, service, &config)?;

    let mut server = McpServer::new(registry).with_name("athena-connector");
    let mut transport = StdioTransport::new();

    info!("stdio server started, waiting for connections");
    server.run(&mut transport).await?;

    info!("athena-mcp exited cleanly");
    Ok(())
}

/// Build the service and probe connectivity once.
///
/// A credentials failure degrades every tool call to a configuration-error
/// response instead of aborting startup; any other probe failure only warns.
async fn initialize_service(config: &AthenaConfig) -> Option<Arc<AthenaService>> {
    let api = AwsAthenaApi::connect(config).await;
    let service = Arc::new(AthenaService::new(Arc::new(api), config.clone()));

    match service.test_connectivity().await {
        Ok(count) => {
            info!(databases = count, "connected to AWS Athena");
            Some(service)
        }
        Err(AthenaError::Credentials(reason)) => {
            error!(
                reason = %reason,
                "AWS credentials unavailable; tool calls will return a configuration error"
            );
            None
        }
        Err(e) => {
            warn!(error = %e, "connectivity check failed, continuing anyway");
            Some(service)
        }
    }
}
