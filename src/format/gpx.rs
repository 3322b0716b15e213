//! GPX output formatter

use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// GPX formatter - outputs one waypoint per repeater
pub struct GpxFormatter;

/// Escape text for use inside XML elements
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, listing: &Listing) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="repeaterbook">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str("    <name>RepeaterBook repeaters</name>\n");
        gpx.push_str(&format!("    <time>{}</time>\n", listing.generated.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        if let Some(radius) = &listing.radius {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                radius.origin.lat, radius.origin.lng
            ));
            gpx.push('\n');
            gpx.push_str("    <name>Search origin</name>\n");
            gpx.push_str(&format!(
                "    <desc>Radius: {} {}</desc>\n",
                radius.distance, radius.unit
            ));
            gpx.push_str("  </wpt>\n");
        }

        for entry in &listing.entries {
            let record = &entry.record;
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                record.latitude, record.longitude
            ));
            gpx.push('\n');

            let callsign = record.callsign.as_deref().unwrap_or("Repeater");
            gpx.push_str(&format!(
                "    <name>{} {:.4}</name>\n",
                escape(callsign),
                record.frequency
            ));

            let mut desc = format!(
                "{} {:+.3} MHz",
                record.modes().join("/"),
                record.offset()
            );
            if let Some(tone) = &record.pl_ctcss_uplink {
                desc.push_str(&format!(", PL {}", tone));
            }
            if !record.location_nearest_city.is_empty() {
                desc.push_str(&format!(", {}", record.location_nearest_city));
            }
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&desc)));
            gpx.push_str("    <sym>Radio Beacon</sym>\n");

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_listing;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter.format(&sample_listing()).unwrap();

        // Verify GPX structure
        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains("Search origin"));
        assert!(output.contains(r#"<wpt lat="34.1478" lon="-118.1445">"#));
        assert!(output.contains("<name>W6ABC 146.9400</name>"));
        assert!(output.contains("</gpx>"));
        // origin plus two repeaters
        assert_eq!(output.matches("<wpt").count(), 3);
    }

    #[test]
    fn test_gpx_escapes_text() {
        let output = GpxFormatter.format(&sample_listing()).unwrap();
        assert!(output.contains("Pasadena &amp; Altadena"));
        assert!(!output.contains("Pasadena & Altadena"));
    }

    #[test]
    fn test_gpx_formatter_info() {
        let formatter = GpxFormatter;
        assert_eq!(formatter.name(), "gpx");
        assert!(!formatter.description().is_empty());
    }
}
