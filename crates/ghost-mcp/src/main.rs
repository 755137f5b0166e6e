//! Ghost Posts MCP Server
//!
//! A Model Context Protocol server that lets agents manage the posts of a
//! Ghost site through the Admin API.
//!
//! # Usage
//!
//! ```bash
//! ghost-mcp --url https://blog.example.com --admin-api-key <id>:<secret>
//! ghost-mcp --config ghost.toml
//! ```
//!
//! # Environment Variables
//!
//! - `GHOST_API_URL`: Site URL
//! - `GHOST_ADMIN_API_KEY`: Admin API key (`{id}:{secret}`)
//! - `GHOST_API_VERSION`: `Accept-Version` header (default: `v5.0`)
//! - `GHOST_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
//! - `RUST_LOG`: Control log verbosity (default: `ghost_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ghost_admin::{AdminClient, PartialConfig};
use ghost_mcp::{GhostMcpServer, register_post_tools};

/// MCP server for Ghost posts
#[derive(Parser)]
#[command(name = "ghost-mcp")]
#[command(about = "MCP server for Ghost posts")]
#[command(version)]
struct Args {
    /// TOML file with url, admin_api_key, version and timeout_secs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ghost site URL
    #[arg(long, env = "GHOST_API_URL")]
    url: Option<String>,

    /// Admin API key in `{id}:{secret}` form
    #[arg(long, env = "GHOST_ADMIN_API_KEY", hide_env_values = true)]
    admin_api_key: Option<String>,

    /// Admin API version
    #[arg(long, env = "GHOST_API_VERSION")]
    api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GHOST_TIMEOUT_SECS")]
    timeout: Option<u64>,
}

impl Args {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            url: self.url.clone(),
            admin_api_key: self.admin_api_key.clone(),
            version: self.api_version.clone(),
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ghost_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = match &args.config {
        Some(path) => PartialConfig::load(path)?,
        None => PartialConfig::default(),
    };
    let config = file.merge(args.overrides()).build()?;

    tracing::info!(
        api = %config.api_base,
        version = %config.version,
        key_id = %config.key.id(),
        "Starting ghost-mcp server"
    );

    let client = Arc::new(AdminClient::new(config)?);

    let mut server = GhostMcpServer::new();
    register_post_tools(&mut server, client);
    server.run().await?;

    Ok(())
}
