//! Amateur radio frequency bands
//!
//! A [`Band`] is a named frequency range in MHz. [`band_filter`] turns one or
//! more bands into a record predicate; bounds are inclusive on both ends.

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// A named frequency range in MHz
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
}

impl Band {
    /// Whether a frequency in MHz falls within this band
    pub fn contains(&self, frequency: f64) -> bool {
        (self.low..=self.high).contains(&frequency)
    }
}

/// The bands repeaters operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bands {
    M10,
    M6,
    M4,
    M2,
    Cm70,
    Cm33,
    Cm23,
    Cm13,
    Cm3,
}

impl Bands {
    /// Every band, lowest frequency first
    pub const ALL: [Bands; 9] = [
        Bands::M10,
        Bands::M6,
        Bands::M4,
        Bands::M2,
        Bands::Cm70,
        Bands::Cm33,
        Bands::Cm23,
        Bands::Cm13,
        Bands::Cm3,
    ];

    /// Frequency range of this band
    pub const fn band(self) -> Band {
        match self {
            Self::M10 => Band { name: "10m", low: 28.0, high: 29.7 },
            Self::M6 => Band { name: "6m", low: 50.0, high: 54.0 },
            Self::M4 => Band { name: "4m", low: 70.0, high: 71.0 },
            Self::M2 => Band { name: "2m", low: 144.0, high: 148.0 },
            Self::Cm70 => Band { name: "70cm", low: 420.0, high: 450.0 },
            Self::Cm33 => Band { name: "33cm", low: 902.0, high: 928.0 },
            Self::Cm23 => Band { name: "23cm", low: 1240.0, high: 1300.0 },
            Self::Cm13 => Band { name: "13cm", low: 2300.0, high: 2450.0 },
            Self::Cm3 => Band { name: "3cm", low: 10_000.0, high: 10_500.0 },
        }
    }
}

impl std::fmt::Display for Bands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.band().name)
    }
}

impl std::str::FromStr for Bands {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "");
        Bands::ALL
            .into_iter()
            .find(|b| b.band().name == wanted)
            .ok_or_else(|| format!("Unknown band: {}", s))
    }
}

/// Predicate matching records whose frequency lies in any of the bands
pub fn band_filter(bands: &[Band]) -> impl Fn(&Record) -> bool + '_ {
    move |record| bands.iter().any(|band| band.contains(record.frequency))
}

/// Records whose frequency lies in any of the bands
pub fn filter_band<I>(records: I, bands: &[Band]) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    let matches = band_filter(bands);
    records.into_iter().filter(|r| matches(r)).collect()
}
