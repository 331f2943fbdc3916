//! Subdomain route server.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                  SUBDOMAIN ROUTES                    │
//!                 │                                                      │
//!   Client        │  ┌─────────┐    ┌──────────────┐    ┌────────────┐  │
//!   Request ──────┼─▶│  http   │───▶│ environment  │───▶│  RouteSet  │  │
//!                 │  │ server  │    │ (subdomain)  │    │ recognize  │  │
//!                 │  └────┬────┘    └──────────────┘    └─────┬──────┘  │
//!                 │       │                                   │         │
//!   JSON  ◀───────┼───────┘◀──────── urls (UrlWriter) ◀───────┘         │
//!                 │                                                      │
//!                 │  ┌────────────┐   ┌────────────┐   ┌──────────────┐ │
//!                 │  │   config   │──▶│ RouteTable │   │  lifecycle   │ │
//!                 │  │  + watcher │   │ (arc-swap) │   │  shutdown    │ │
//!                 │  └────────────┘   └────────────┘   └──────────────┘ │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use subdomain_routes::config::{load_config, ConfigWatcher};
use subdomain_routes::lifecycle::{shutdown_signal, Shutdown};
use subdomain_routes::observability::init_logging;
use subdomain_routes::{HttpServer, RouteTable};

#[derive(Parser)]
#[command(name = "subdomain-routes")]
#[command(about = "Serve subdomain-aware route recognition over HTTP", long_about = None)]
struct Args {
    /// Route configuration file (TOML)
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Do not reload the configuration when the file changes
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    init_logging(&config.observability)?;
    tracing::info!("subdomain-routes v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = ?args.config,
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let table = Arc::new(RouteTable::from_config(&config)?);

    let (watcher, config_updates) = ConfigWatcher::new(&args.config);
    // Dropping the watcher stops notifications; keep it for the whole run.
    let _watcher = if args.no_watch {
        None
    } else {
        Some(watcher.run()?)
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, table);
    server.run(listener, config_updates, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
