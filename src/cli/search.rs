//! Search command handler
//!
//! Finds the nearest peaks and prints them in the chosen format.

use crate::cli::location::{resolve_center, LocationArgs};
use crate::cli::until_cancelled;
use crate::config::Config;
use crate::coord::DistanceUnit;
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter};
use crate::peaks::{get_peak_source, run_search, PeakSearch};
use clap::Args;
use std::str::FromStr;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Maximum number of peaks to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Unit for search radii and printed distances (meters, kilometers, miles)
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Map provider for the url format
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

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

    let mut config = Config::load()?;
    if let Some(unit) = &args.unit {
        config.search.unit = DistanceUnit::from_str(unit).map_err(Error::Config)?;
    }

    let center = resolve_center(&args.location, &config).await?;
    let limit = args.limit.unwrap_or(config.search.max_results);
    let format = args.format.clone().unwrap_or(config.output.format.clone());

    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let search = PeakSearch::from_config(get_peak_source(&config.search)?, &config.search)?;

    let Some(response) = until_cancelled(run_search(&search, center, limit)).await? else {
        return Ok(());
    };

    let output = if format.eq_ignore_ascii_case("url") {
        UrlFormatter.format_with_provider(&response, &config, args.provider.as_deref())?
    } else {
        formatter.format(&response, &config)?
    };

    if output.is_empty() {
        eprintln!("No peaks found");
    }

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
