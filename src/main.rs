//! nearby CLI entry point
//!
//! Find your position and nearby places - CLI + web app

use nearby::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
