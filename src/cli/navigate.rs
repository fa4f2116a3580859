//! Navigate command handler
//!
//! Searches, picks one of the nearest peaks and prints the hand-off for the
//! directions provider.

use crate::cli::location::{resolve_center, LocationArgs};
use crate::cli::until_cancelled;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::navigation::{RouteRequest, TravelProfile};
use crate::peaks::{get_peak_source, PeakSearch};
use clap::Args;
use std::str::FromStr;

/// Navigate command arguments
#[derive(Args)]
pub struct NavigateArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Which peak to navigate to, 1 being the nearest
    #[arg(long, short = 'p', default_value_t = 1)]
    pub pick: usize,

    /// Travel profile (driving_traffic, driving, walking, cycling)
    #[arg(long)]
    pub profile: Option<String>,

    /// Directions provider (google, openstreetmap, apple)
    #[arg(long)]
    pub provider: Option<String>,

    /// Print the route request as JSON instead of a URL
    #[arg(long)]
    pub json: bool,
}

/// Run the navigate command
pub async fn run(args: NavigateArgs) -> Result<()> {
    if args.pick == 0 {
        return Err(Error::InvalidLimit("--pick starts at 1".to_string()));
    }

    let config = Config::load()?;
    let profile = match &args.profile {
        Some(name) => TravelProfile::from_str(name).map_err(Error::Config)?,
        None => config.navigation.profile,
    };

    let center = resolve_center(&args.location, &config).await?;
    let search = PeakSearch::from_config(get_peak_source(&config.search)?, &config.search)?;

    let Some(ranked) = until_cancelled(search.find_nearest_peaks(center, args.pick)).await? else {
        return Ok(());
    };

    let chosen = ranked.get(args.pick - 1).ok_or_else(|| {
        Error::Geo(format!(
            "Only {} peak(s) found, cannot pick #{}",
            ranked.len(),
            args.pick
        ))
    })?;

    let unit = config.search.unit;
    eprintln!(
        "Navigating to {} ({:.2} {})",
        chosen.peak.name,
        unit.from_meters(chosen.distance_meters),
        unit.symbol()
    );

    let route = RouteRequest::to_peak(center, &chosen.peak, profile)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        println!("{}", route.directions_url(&config, args.provider.as_deref())?);
    }

    Ok(())
}
