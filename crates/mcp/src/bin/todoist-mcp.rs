// Standalone MCP server binary

use anyhow::{bail, Result};
use clap::Parser;
use todoist_mcp::config::McpConfig;
use todoist_mcp::server::McpServer;
use todoist_mcp::tools::todoist_registry;
use todoist_sdk::TodoistClient;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "todoist-mcp", version)]
#[command(about = "Model Context Protocol server for the Todoist API", long_about = None)]
struct Args {
    /// Todoist API base URL (overrides TODOIST_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds (overrides TODOIST_TIMEOUT)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };

    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = McpConfig::from_env();
    let debug_enabled = args.debug || loaded.as_ref().map(|c| c.debug).unwrap_or(false);
    init_tracing(debug_enabled);

    info!("Starting Todoist MCP Server...");

    let mut config = loaded.inspect_err(|e| error!("Failed to load configuration: {:#}", e))?;
    config.apply_overrides(args.base_url, args.timeout_ms, args.debug);
    debug!(
        base_url = %config.base_url,
        timeout_ms = config.timeout.as_millis() as u64,
        retry_attempts = config.retry_attempts,
        debug = config.debug,
        "Configuration loaded"
    );

    if !config.api_key_looks_valid() {
        warn!("API key format appears invalid (expected 40-character hex string)");
    }

    let client = TodoistClient::new(config.to_client_config()?)?;

    info!("Testing Todoist API connection...");
    if !client.health().check().await {
        error!("Failed to connect to Todoist API. Please check your API key.");
        bail!("Todoist API health check failed");
    }
    info!("Successfully connected to Todoist API");

    let registry = todoist_registry(client);
    info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    info!("Shutting down Todoist MCP Server");

    // A pending stdin read would otherwise hold the runtime open
    std::process::exit(0)
}
