//! Search command handler
//!
//! Locates the user, then searches for places matching the query nearby.

use crate::cli::locate::{list_formats, locate, print_state, start};
use crate::cli::{init_logging, PositionArgs};
use crate::config::Config;
use crate::error::Result;
use crate::view::Event;
use clap::Args;
use tracing::debug;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place or street to look for (e.g. KFC, IKEA, Nordborggade)
    #[arg(default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub position: PositionArgs,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");
    let config = Config::load()?;

    let handle = start(&config, &args.position)?;
    let located = locate(&handle).await?;
    debug!("Located at {:?}, searching for {:?}", located.coordinates(), args.query);

    handle.dispatch(Event::QueryChanged(args.query)).await?;
    let state = handle.wait_idle().await?;

    print_state(&state, &config, &args.format)
}
