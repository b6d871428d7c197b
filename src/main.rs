//! NetSuite record relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                      RELAY                           │
//!                 │                                                      │
//!   Client ───────┼─▶ http::server ─▶ logs::access ─▶ http::handlers     │
//!                 │                        │                │           │
//!                 │                        ▼                ▼           │
//!                 │                 logs::broadcaster   upstream::client ┼──▶ NetSuite
//!                 │                        │                │  (oauth)   │     record API
//!                 │                        ▼                │           │
//!   Viewer ◀──────┼──────────────── http::websocket         │           │
//!                 │                                                      │
//!                 │   config · lifecycle · observability                │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use netsuite_relay::config::load_config;
use netsuite_relay::lifecycle::{spawn_signal_handler, Shutdown};
use netsuite_relay::observability::init_tracing;
use netsuite_relay::HttpServer;

#[derive(Parser)]
#[command(name = "netsuite-relay")]
#[command(about = "Signed relay for NetSuite driver records with live access logs", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing()?;

    tracing::info!("netsuite-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        log_capacity = config.logs.capacity,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, shutdown.clone())?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
