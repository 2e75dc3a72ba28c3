//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::view::ViewState;

/// JSON formatter - outputs the page state as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Page state as JSON"
    }

    fn format(&self, state: &ViewState, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{copenhagen, ikea};

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&copenhagen("IKEA", ikea()), &Config::default())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["address"]["city"], "Copenhagen");
        assert_eq!(parsed["position"]["coordinates"]["lat"], 55.6761);
        assert_eq!(parsed["query"], "IKEA");
        assert_eq!(parsed["places"][0]["id"], 42);
        assert!(parsed.get("address_requests").is_none());
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
