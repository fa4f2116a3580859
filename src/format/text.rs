//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::peaks::search::AttemptOutcome;
use crate::peaks::SearchResponse;

/// Text formatter - outputs a numbered list of peaks
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, response: &SearchResponse, _config: &Config) -> Result<String> {
        let unit = response.request.unit;
        let mut output = String::new();

        output.push_str(&format!("Peaks near {}\n", response.center()));

        if response.peaks.is_empty() {
            let searched = response
                .attempts
                .last()
                .map(|a| format!(" within {} {}", a.radius, unit.symbol()))
                .unwrap_or_default();
            output.push_str(&format!("No peaks found{}\n", searched));
        } else {
            for (rank, ranked) in response.peaks.iter().enumerate() {
                let peak = &ranked.peak;
                let elevation = peak
                    .elevation_meters
                    .map(|m| format!(", {:.0} m", m))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  {}. {} ({:.2} {}{}) at {}\n",
                    rank + 1,
                    peak.name,
                    unit.from_meters(ranked.distance_meters),
                    unit.symbol(),
                    elevation,
                    peak.coords
                ));
            }
        }

        let failures: Vec<String> = response
            .attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed { kind, .. } => {
                    Some(format!("{} {}: {}", a.radius, unit.symbol(), kind))
                }
                _ => None,
            })
            .collect();

        if !failures.is_empty() {
            output.push_str(&format!("\nFailed lookups: {}\n", failures.join("; ")));
        }

        Ok(output)
    }
}
