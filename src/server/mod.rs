//! HTTP server for nearby
//!
//! Serves the page and a small JSON API over the page state.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{get_geocoder, GeoBackend, PositionProvider};
use crate::view::coordinator;
use crate::view::ViewSettings;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// Every client sees and drives the same page state; `locator` runs on the
/// server host.
///
/// # Arguments
/// * `config` - Server configuration
/// * `locator` - Position provider answering "Get my position"
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run<P>(config: Config, locator: P) -> Result<()>
where
    P: PositionProvider + 'static,
{
    let geocoder = get_geocoder(&config)?;
    let addr = config.server_addr();
    run_on(&addr, config, locator, geocoder).await
}

/// Start the HTTP server with a specific address and backends
///
/// Useful for tests or when you want to override config
pub async fn run_on<P, G>(addr: &str, config: Config, locator: P, geocoder: G) -> Result<()>
where
    P: PositionProvider + 'static,
    G: GeoBackend + 'static,
{
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    info!("Using position provider: {}", locator.name());
    let handle = coordinator::spawn(locator, geocoder, ViewSettings::from_config(&config));
    let state = Arc::new(AppState::new(config, handle));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
