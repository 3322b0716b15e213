//! Geographic primitives and proximity filtering
//!
//! Provides coordinates, radius queries, bounding boxes and great-circle
//! distance filtering over repeater records.

pub mod bounds;
pub mod distance;

pub use bounds::{bounding_box, BoundingBox};
pub use distance::{filter_radius, haversine_distance, nearest};

use crate::constants::geo::KM_PER_MILE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees, WGS84
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// Unit of a radius distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in this unit to kilometers
    pub fn to_km(self, distance: f64) -> f64 {
        match self {
            Self::Kilometers => distance,
            Self::Miles => distance * KM_PER_MILE,
        }
    }

    /// Convert a distance in kilometers to this unit
    pub fn from_km(self, km: f64) -> f64 {
        match self {
            Self::Kilometers => km,
            Self::Miles => km / KM_PER_MILE,
        }
    }

    /// Short label used in output
    pub fn label(self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometres" => Ok(Self::Kilometers),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

/// A circle on the Earth's surface: origin plus distance in a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Radius {
    pub origin: Coordinates,
    pub distance: f64,
    #[serde(default)]
    pub unit: DistanceUnit,
}

impl Radius {
    /// Create a radius in kilometers
    pub fn new(origin: Coordinates, distance: f64) -> Self {
        Self {
            origin,
            distance,
            unit: DistanceUnit::Kilometers,
        }
    }

    /// Create a radius in the given unit
    pub fn with_unit(origin: Coordinates, distance: f64, unit: DistanceUnit) -> Self {
        Self {
            origin,
            distance,
            unit,
        }
    }

    /// Radius distance converted to kilometers
    pub fn distance_km(&self) -> f64 {
        self.unit.to_km(self.distance)
    }

    /// Check that the origin is on the globe and the distance is positive
    pub fn validate(&self) -> Result<()> {
        self.origin.validate()?;
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Distance must be positive, got {}",
                self.distance
            )));
        }
        Ok(())
    }
}
