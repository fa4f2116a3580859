//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::peaks::SearchResponse;
use quick_xml::escape::escape;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, response: &SearchResponse, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="peak-finder">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>peak-finder search {}</name>\n", response.id));
        gpx.push_str(&format!("    <time>{}</time>\n", response.metadata.timestamp));
        gpx.push_str("  </metadata>\n");

        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            response.request.lat, response.request.lng
        ));
        gpx.push('\n');
        gpx.push_str("    <name>Start</name>\n");
        gpx.push_str("  </wpt>\n");

        for ranked in &response.peaks {
            let peak = &ranked.peak;
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                peak.coords.lat, peak.coords.lng
            ));
            gpx.push('\n');
            if let Some(ele) = peak.elevation_meters {
                gpx.push_str(&format!("    <ele>{}</ele>\n", ele));
            }
            gpx.push_str(&format!("    <name>{}</name>\n", escape(peak.name.as_str())));
            gpx.push_str(&format!(
                "    <desc>{:.0} m from start</desc>\n",
                ranked.distance_meters
            ));
            gpx.push_str("    <sym>Summit</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");

        Ok(gpx)
    }
}
