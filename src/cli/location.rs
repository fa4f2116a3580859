//! Search center resolution shared by the search commands

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{get_geocoder, get_ip_locator, GeoBackend};
use clap::Args;

/// Where to search from
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Named location (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng", "here"])]
    pub location: Option<String>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng", "location"])]
    pub here: bool,

    /// Ignore the cached IP location and look it up again
    #[arg(long, conflicts_with_all = ["lat", "lng", "location"])]
    pub refresh: bool,
}

/// Resolve the search center from arguments, falling back to config
pub async fn resolve_center(args: &LocationArgs, config: &Config) -> Result<Coordinates> {
    let center = if args.here || args.refresh {
        locate_by_ip(args.refresh).await?
    } else if let Some(query) = &args.location {
        let geocoder = get_geocoder()?;
        match geocoder.geocode(query).await? {
            Some(location) => {
                eprintln!("Geocoded to: {}", location.display_name);
                location.coords
            }
            None => return Err(Error::Geo(format!("Could not geocode '{}'", query))),
        }
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        Coordinates::new(lat, lng)
    } else if config.location.default_here {
        locate_by_ip(false).await?
    } else {
        return Err(Error::InvalidCoordinates(
            "No location specified. Use --lat/--lng, --location, or --here".to_string(),
        ));
    };

    center.validate()?;
    Ok(center)
}

async fn locate_by_ip(refresh: bool) -> Result<Coordinates> {
    let locator = get_ip_locator()?;
    let location = if refresh {
        locator.refresh().await?
    } else {
        locator.locate().await?
    };
    eprintln!("Using IP location: {}", location.display_name);
    Ok(location.coords)
}
