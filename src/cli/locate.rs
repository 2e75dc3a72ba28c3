//! Locate command handler
//!
//! Resolves the current position and its address once, then prints them.

use crate::cli::{init_logging, PositionArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::get_geocoder;
use crate::view::coordinator::{self, CoordinatorHandle};
use crate::view::{Event, ViewSettings, ViewState};
use clap::Args;
use std::sync::Arc;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");
    let config = Config::load()?;

    let handle = start(&config, &args.position)?;
    let state = locate(&handle).await?;

    print_state(&state, &config, &args.format)
}

/// Start a coordinator with the configured backends
pub(crate) fn start(config: &Config, position: &PositionArgs) -> Result<CoordinatorHandle> {
    let locator = position.locator(config)?;
    let geocoder = get_geocoder(config)?;
    Ok(coordinator::spawn(
        locator,
        geocoder,
        ViewSettings::from_config(config),
    ))
}

/// Ask for the position and wait until its address is resolved
pub(crate) async fn locate(handle: &CoordinatorHandle) -> Result<Arc<ViewState>> {
    handle.dispatch(Event::LocateRequested).await?;
    let state = handle.wait_idle().await?;

    if let Some(error) = &state.position.error {
        return Err(Error::NoPosition(error.clone()));
    }
    Ok(state)
}

/// Print `state` in the named format
pub(crate) fn print_state(state: &ViewState, config: &Config, format: &str) -> Result<()> {
    let formatter = get_formatter(format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
    print!("{}", formatter.format(state, config)?);
    Ok(())
}

/// Print available output formats
pub(crate) fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:<6} - {}", format.name, format.description);
    }
}
