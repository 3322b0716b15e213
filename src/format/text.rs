//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{Listing, ListingEntry, OutputFormatter};

/// Text formatter - one line per repeater
pub struct TextFormatter;

fn location(entry: &ListingEntry) -> String {
    let record = &entry.record;
    [
        Some(record.location_nearest_city.as_str()).filter(|s| !s.is_empty()),
        record.state.as_deref().or(record.region.as_deref()),
        record.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, listing: &Listing) -> Result<String> {
        let mut output = String::new();

        // Header
        match &listing.radius {
            Some(radius) => output.push_str(&format!(
                "{} repeaters within {} {} of ({:.4}, {:.4})\n\n",
                listing.count,
                radius.distance,
                radius.unit,
                radius.origin.lat,
                radius.origin.lng
            )),
            None => output.push_str(&format!("{} repeaters\n\n", listing.count)),
        }

        let unit = listing.radius.map(|r| r.unit.label()).unwrap_or("");
        for entry in &listing.entries {
            let record = &entry.record;
            output.push_str(&format!(
                "{:<10} {:>10.4} {:>+7.3}  {:<6} {:<14} {}",
                record.callsign.as_deref().unwrap_or("-"),
                record.frequency,
                record.offset(),
                record.pl_ctcss_uplink.as_deref().unwrap_or(""),
                record.modes().join("/"),
                location(entry),
            ));
            if let Some(distance) = entry.distance {
                output.push_str(&format!("  {:.1} {}", distance, unit));
            }
            if record.operational_status != crate::record::Status::OnAir {
                output.push_str(&format!("  [{}]", record.operational_status));
            }
            output.push('\n');
        }

        Ok(output)
    }
}
