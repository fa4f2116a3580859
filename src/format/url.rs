//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::peaks::SearchResponse;

/// URL formatter - outputs a map URL for each peak, nearest first
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URLs with optional provider override
    pub fn format_with_provider(
        &self,
        response: &SearchResponse,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let urls = response
            .peaks
            .iter()
            .map(|ranked| {
                config.format_url(provider, ranked.peak.coords.lat, ranked.peak.coords.lng)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(urls.join("\n"))
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for each peak"
    }

    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String> {
        self.format_with_provider(response, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::response::test_support::{empty_response, sample_response};

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter
            .format(&sample_response(), &Config::default())
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "https://www.openstreetmap.org/#map=14/46/8.01");
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&sample_response(), &Config::default(), Some("apple"))
            .unwrap();
        assert!(output.starts_with("https://maps.apple.com/?ll=46,8.01"));
    }

    #[test]
    fn test_url_format_empty() {
        let output = UrlFormatter
            .format(&empty_response(), &Config::default())
            .unwrap();
        assert!(output.is_empty());
    }
}
