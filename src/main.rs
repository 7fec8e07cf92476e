//! Journeys API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, fallback dispatch)
//!                         │
//!                         ▼
//!                     routing::Router (method + path → Endpoint)
//!                         │
//!                         ▼
//!                     http::operation (content type → body → decode)
//!                         │
//!                         ▼
//!                     endpoint::* handler
//!                         │
//!                         ▼
//!     Client Response ◀── http::operation (encode or map error)
//!
//!     Cross-cutting: config, observability, lifecycle (shutdown)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use journeys::config::{load_config, JourneysConfig};
use journeys::id::UuidV4;
use journeys::lifecycle::{signals, Shutdown};
use journeys::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "journeys")]
#[command(about = "Journeys API server", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => JourneysConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "journeys starting"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    let server = journeys::app::init(&config, shutdown.subscribe(), Arc::new(UuidV4))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.http.request_timeout_secs,
        max_body_bytes = config.http.max_body_bytes,
        "Listening for connections"
    );

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
