//! JSON output formatter

use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// JSON formatter - outputs the full listing as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON listing"
    }

    fn format(&self, listing: &Listing) -> Result<String> {
        Ok(serde_json::to_string_pretty(listing)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_listing;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_listing()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["count"], 2);
        assert!(parsed.get("generated").is_some());
        assert_eq!(parsed["radius"]["distance"], 25.0);

        let first = &parsed["entries"][0];
        assert_eq!(first["callsign"], "W6ABC");
        assert_eq!(first["state_id"], "06");
        assert_eq!(first["distance"], 0.0);
    }

    #[test]
    fn test_json_omits_missing_distance() {
        let listing = Listing::new(vec![crate::record::tests::sample_record()]);
        let output = JsonFormatter.format(&listing).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("radius").is_none());
        assert!(parsed["entries"][0].get("distance").is_none());
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
