//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::peaks::SearchResponse;

/// JSON formatter - outputs full response as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format(&self, response: &SearchResponse, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::response::test_support::sample_response;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&sample_response(), &Config::default())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("id").is_some());
        assert!(parsed.get("request").is_some());
        assert_eq!(parsed["peaks"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["attempts"].as_array().unwrap().len(), 2);
    }
}
