//! peak-finder CLI entry point
//!
//! Nearest mountain peak search - CLI + web API

use peak_finder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
