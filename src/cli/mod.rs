//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod location;
pub mod navigate;
pub mod search;
pub mod serve;

use crate::error::Result;
use clap::{Parser, Subcommand};
use std::future::Future;
use tracing_subscriber::EnvFilter;

/// Find nearby mountain peaks
#[derive(Parser)]
#[command(name = "peak-finder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the nearest peaks
    Search(search::SearchArgs),

    /// Get directions to one of the nearest peaks
    Navigate(navigate::NavigateArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            init_logging("warn");
            search::run(args).await
        }
        Commands::Navigate(args) => {
            init_logging("warn");
            navigate::run(args).await
        }
        Commands::Serve(args) => {
            init_logging("info");
            serve::run(args).await
        }
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` overrides the given default filter.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run a future until it completes or the user presses Ctrl-C
///
/// Returns `None` when cancelled; the future and any partial results are
/// dropped.
pub async fn until_cancelled<T>(future: impl Future<Output = Result<T>>) -> Result<Option<T>> {
    tokio::select! {
        result = future => result.map(Some),
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Cancelled");
            Ok(None)
        }
    }
}
