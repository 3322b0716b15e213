//! Output formatters
//!
//! Provides trait-based output formatting for repeater listings.

pub mod gpx;
pub mod json;
pub mod text;

use crate::geo::Radius;
use crate::record::Record;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One listed repeater, with its distance when the search had a radius
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    #[serde(flatten)]
    pub record: Record,
    /// Distance from the search origin in the radius unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Search results ready for output
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub generated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<Radius>,
    pub count: usize,
    pub entries: Vec<ListingEntry>,
}

impl Listing {
    /// Listing without distances
    pub fn new(records: Vec<Record>) -> Self {
        let entries: Vec<ListingEntry> = records
            .into_iter()
            .map(|record| ListingEntry {
                record,
                distance: None,
            })
            .collect();
        Self {
            generated: Utc::now(),
            radius: None,
            count: entries.len(),
            entries,
        }
    }

    /// Listing of radius search hits, nearest first
    pub fn with_distances(hits: Vec<(Record, f64)>, radius: Radius) -> Self {
        let entries: Vec<ListingEntry> = hits
            .into_iter()
            .map(|(record, distance)| ListingEntry {
                record,
                distance: Some(distance),
            })
            .collect();
        Self {
            generated: Utc::now(),
            radius: Some(radius),
            count: entries.len(),
            entries,
        }
    }
}

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

    /// Render the listing
    fn format(&self, listing: &Listing) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    ["json", "text", "gpx"]
        .into_iter()
        .filter_map(get_formatter)
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}
