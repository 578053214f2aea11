//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It parses the command
//! line, initializes logging, loads configuration, discovers the store tools
//! and starts the selected transport.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use bigcommerce_mcp_server::core::{
    Config, McpServer, TransportConfig, TransportService, registry_for,
};
use bigcommerce_mcp_server::domains::tools::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "bigcommerce-mcp-server", version)]
#[command(about = "MCP server exposing read-only BigCommerce store data", long_about = None)]
struct Cli {
    /// Serve over Server-Sent Events (GET /sse + POST /messages)
    #[arg(long)]
    sse: bool,

    /// Serve stateless JSON-RPC over HTTP (POST /mcp)
    #[arg(long = "streamable-http")]
    streamable_http: bool,

    /// Port for the networked transports (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.http.port = port;
    }

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.log_summary();

    run(cli, config).await.inspect_err(|e| error!("{}", e))?;

    info!("Server shutting down");
    Ok(())
}

/// Select the transport, discover tools and serve until shutdown.
async fn run(cli: Cli, config: Config) -> bigcommerce_mcp_server::Result<()> {
    let transport = TransportConfig::from_flags(cli.sse, cli.streamable_http, config.http.clone())?;

    let registry = registry_for(&transport, ToolRegistry::discover(&config).await)?;

    let server = McpServer::new(config, registry);
    info!("Server initialized with {} tools", server.tool_count());

    TransportService::new(transport).run(server).await?;
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr: stdout carries protocol frames in STDIO mode.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
