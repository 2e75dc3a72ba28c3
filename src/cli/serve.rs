//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.
//!
//! The server holds a single page state shared by every connected browser.
//! Positions come from the configured provider on the server side, so with
//! the `ip` provider the page shows where the server is, not the visitor.

use crate::cli::{init_logging, PositionArgs};
use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    #[command(flatten)]
    pub position: PositionArgs,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    init_logging("info");

    // Load and optionally override config
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let locator = args.position.locator(&config)?;

    info!(
        "Starting nearby server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    server::run(config, locator).await
}
