//! Output formatters
//!
//! Provides trait-based output formatting for search results.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::peaks::SearchResponse;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format the search response
    ///
    /// # Arguments
    /// * `response` - The search response to format
    /// * `config` - Application config (for url providers, units, etc.)
    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        json::JsonFormatter.info(),
        text::TextFormatter.info(),
        gpx::GpxFormatter.info(),
        url::UrlFormatter.info(),
    ]
    .into()
}

trait Describe {
    fn info(&self) -> FormatInfo;
}

impl<T: OutputFormatter> Describe for T {
    fn info(&self) -> FormatInfo {
        FormatInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}
