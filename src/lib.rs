//! peak-finder: Nearest Mountain Peak Search
//!
//! A library and CLI tool for finding named mountain peaks near a location
//! using OpenStreetMap data, and handing a chosen peak to a directions
//! provider.
//!
//! ## Features
//!
//! - Expanding-radius search that stops at the first radius with results
//! - Haversine ranking with stable tie-breaking, bounded to the top N
//! - Soft failure: unreachable or garbled lookups are logged and skipped
//! - Directions URLs for Google Maps, OpenStreetMap and Apple Maps
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use peak_finder::coord::Coordinates;
//! use peak_finder::peaks::overpass::OverpassClient;
//! use peak_finder::peaks::PeakSearch;
//! use peak_finder::config::SearchConfig;
//!
//! # async fn demo() -> peak_finder::Result<()> {
//! let config = SearchConfig::default();
//! let search = PeakSearch::from_config(OverpassClient::new(&config)?, &config)?;
//!
//! let here = Coordinates::new(46.5580, 7.8355);
//! let peaks = search.find_nearest_peaks(here, 5).await?;
//! for ranked in &peaks {
//!     println!("{} at {:.0} m", ranked.peak.name, ranked.distance_meters);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod navigation;
pub mod peaks;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, DistanceUnit};
pub use error::{Error, QueryError, Result};
pub use peaks::{PeakRecord, PeakSearch, PeakSource, RankedPeak, RankedResult};
