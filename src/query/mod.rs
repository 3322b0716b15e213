//! Declarative export queries
//!
//! A [`Query`] describes which repeaters to export. It is built once with the
//! `with_*` methods and then only read; [`router`] decides which export
//! endpoints can answer it.

pub mod router;

pub use router::{export_urls, route, site_url, Endpoint};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Operating mode filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Analog,
    Dmr,
    Nxdn,
    P25,
    Tetra,
}

impl Mode {
    /// Value sent in the `mode` parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Analog => "analog",
            Self::Dmr => "DMR",
            Self::Nxdn => "NXDN",
            Self::P25 => "P-25",
            Self::Tetra => "tetra",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analog" | "fm" => Ok(Self::Analog),
            "dmr" => Ok(Self::Dmr),
            "nxdn" => Ok(Self::Nxdn),
            "p25" | "p-25" => Ok(Self::P25),
            "tetra" => Ok(Self::Tetra),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

/// Emergency-service affiliation filter (North America only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emergency {
    Ares,
    Races,
    Skywarn,
    Canwarn,
}

impl Emergency {
    /// Value sent in the `emcomm` parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Ares => "ARES",
            Self::Races => "RACES",
            Self::Skywarn => "SKYWARN",
            Self::Canwarn => "CANWARN",
        }
    }
}

impl std::str::FromStr for Emergency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ares" => Ok(Self::Ares),
            "races" => Ok(Self::Races),
            "skywarn" => Ok(Self::Skywarn),
            "canwarn" => Ok(Self::Canwarn),
            _ => Err(format!("Unknown emergency service: {}", s)),
        }
    }
}

/// Radio service filter (North America only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Gmrs,
}

impl ServiceType {
    /// Value sent in the `stype` parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Gmrs => "GMRS",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gmrs" => Ok(Self::Gmrs),
            _ => Err(format!("Unknown service type: {}", s)),
        }
    }
}

const HZ_PER_MHZ: u64 = 1_000_000;

/// A frequency held as whole hertz so it can be hashed and ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Frequency(u64);

impl Frequency {
    /// Frequency from whole hertz
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Frequency from megahertz, rounded to the nearest hertz
    pub fn from_mhz(mhz: f64) -> Self {
        Self((mhz * 1_000_000.0).round().max(0.0) as u64)
    }

    pub const fn hz(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Frequency {
    /// Megahertz without trailing zeros, e.g. `146.94`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / HZ_PER_MHZ;
        let frac = self.0 % HZ_PER_MHZ;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:06}", frac);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    /// Parse megahertz exactly, e.g. `"146.940"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid frequency: {}", s);
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 6 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac: u64 = format!("{:0<6}", frac).parse().map_err(|_| invalid())?;
        whole
            .checked_mul(HZ_PER_MHZ)
            .and_then(|hz| hz.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// An export query; every filter is optional and empty by default
///
/// Countries and regions are the display names RepeaterBook uses
/// (`"United States"`, `"South America"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Query {
    callsigns: BTreeSet<String>,
    cities: BTreeSet<String>,
    landmarks: BTreeSet<String>,
    countries: BTreeSet<String>,
    frequencies: BTreeSet<Frequency>,
    modes: BTreeSet<Mode>,
    regions: BTreeSet<String>,
    state_ids: BTreeSet<String>,
    counties: BTreeSet<String>,
    emergency: BTreeSet<Emergency>,
    service_types: BTreeSet<ServiceType>,
}

fn strings<I, S>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into)
}

impl Query {
    /// Empty query (matches everything, routed to both endpoints)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callsigns<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.callsigns.extend(strings(items));
        self
    }

    pub fn with_cities<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.cities.extend(strings(items));
        self
    }

    pub fn with_landmarks<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.landmarks.extend(strings(items));
        self
    }

    pub fn with_countries<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.countries.extend(strings(items));
        self
    }

    pub fn with_frequencies<I: IntoIterator<Item = Frequency>>(mut self, items: I) -> Self {
        self.frequencies.extend(items);
        self
    }

    pub fn with_modes<I: IntoIterator<Item = Mode>>(mut self, items: I) -> Self {
        self.modes.extend(items);
        self
    }

    pub fn with_regions<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.regions.extend(strings(items));
        self
    }

    pub fn with_state_ids<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.state_ids.extend(strings(items));
        self
    }

    pub fn with_counties<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.counties.extend(strings(items));
        self
    }

    pub fn with_emergency<I: IntoIterator<Item = Emergency>>(mut self, items: I) -> Self {
        self.emergency.extend(items);
        self
    }

    pub fn with_service_types<I: IntoIterator<Item = ServiceType>>(mut self, items: I) -> Self {
        self.service_types.extend(items);
        self
    }

    pub fn callsigns(&self) -> &BTreeSet<String> {
        &self.callsigns
    }

    pub fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    pub fn landmarks(&self) -> &BTreeSet<String> {
        &self.landmarks
    }

    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    pub fn frequencies(&self) -> &BTreeSet<Frequency> {
        &self.frequencies
    }

    pub fn modes(&self) -> &BTreeSet<Mode> {
        &self.modes
    }

    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn state_ids(&self) -> &BTreeSet<String> {
        &self.state_ids
    }

    pub fn counties(&self) -> &BTreeSet<String> {
        &self.counties
    }

    pub fn emergency(&self) -> &BTreeSet<Emergency> {
        &self.emergency
    }

    pub fn service_types(&self) -> &BTreeSet<ServiceType> {
        &self.service_types
    }

    /// Whether any North-America-only filter is set
    pub fn uses_north_america_fields(&self) -> bool {
        !self.state_ids.is_empty()
            || !self.counties.is_empty()
            || !self.emergency.is_empty()
            || !self.service_types.is_empty()
    }

    /// Whether any rest-of-world-only filter is set
    pub fn uses_rest_of_world_fields(&self) -> bool {
        !self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_default_is_empty() {
        let query = Query::new();
        assert!(query.callsigns().is_empty());
        assert!(query.countries().is_empty());
        assert!(query.modes().is_empty());
        assert!(!query.uses_north_america_fields());
        assert!(!query.uses_rest_of_world_fields());
    }

    #[test]
    fn test_value_equality_and_hashing() {
        let a = Query::new()
            .with_modes([Mode::Dmr, Mode::Nxdn])
            .with_countries(["Brazil"]);
        let b = Query::new()
            .with_countries(["Brazil"])
            .with_modes([Mode::Nxdn, Mode::Dmr, Mode::Dmr]);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_field_hints() {
        assert!(Query::new().with_state_ids(["06"]).uses_north_america_fields());
        assert!(Query::new().with_emergency([Emergency::Ares]).uses_north_america_fields());
        assert!(Query::new().with_service_types([ServiceType::Gmrs]).uses_north_america_fields());
        assert!(Query::new().with_regions(["Europe"]).uses_rest_of_world_fields());
        assert!(!Query::new().with_modes([Mode::Dmr]).uses_north_america_fields());
    }

    #[test]
    fn test_param_values() {
        assert_eq!(Mode::P25.as_param(), "P-25");
        assert_eq!(Mode::Analog.as_param(), "analog");
        assert_eq!(Emergency::Skywarn.as_param(), "SKYWARN");
        assert_eq!(ServiceType::Gmrs.as_param(), "GMRS");
        assert_eq!(Mode::from_str("p25").unwrap(), Mode::P25);
        assert!(Mode::from_str("ssb").is_err());
        assert_eq!(Emergency::from_str("CANWARN").unwrap(), Emergency::Canwarn);
    }

    #[test]
    fn test_frequency_parse_and_display() {
        let f = Frequency::from_str("146.940").unwrap();
        assert_eq!(f.hz(), 146_940_000);
        assert_eq!(f.to_string(), "146.94");
        assert_eq!(Frequency::from_str("446").unwrap().to_string(), "446");
        assert_eq!(Frequency::from_str("146.9425").unwrap().hz(), 146_942_500);
        assert_eq!(Frequency::from_mhz(146.94), f);
        assert!(Frequency::from_str("abc").is_err());
        assert!(Frequency::from_str("146.1234567").is_err());
        assert!(Frequency::from_str("-5").is_err());
    }
}
