//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod search;
pub mod serve;

use crate::config::{Config, LocationProvider};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{get_locator, FixedPosition, Locator};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find where you are and what is nearby
#[derive(Parser)]
#[command(name = "nearby")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    ///
    /// All browsers share one page state, and the `ip` provider locates the
    /// machine running the server, not the visitor. Bind beyond localhost
    /// only when that is what you want.
    Serve(serve::ServeArgs),

    /// Show your position and address
    Locate(locate::LocateArgs),

    /// Search for places near your position
    Search(search::SearchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Where the position comes from, overriding the config file
#[derive(Args, Debug, Default)]
pub struct PositionArgs {
    /// Latitude (use with --lng instead of asking the position provider)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Position provider: ip, fixed or disabled
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub provider: Option<String>,
}

impl PositionArgs {
    /// Build the position provider from these flags and `config`
    pub fn locator(&self, config: &Config) -> Result<Locator> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            return Ok(Locator::Fixed(FixedPosition(coords)));
        }

        match &self.provider {
            Some(name) => {
                let provider: LocationProvider = name.parse().map_err(Error::Config)?;
                let mut config = config.clone();
                config.location.provider = provider;
                get_locator(&config)
            }
            None => get_locator(config),
        }
    }
}

/// Initialize logging, honouring `RUST_LOG` when set
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
