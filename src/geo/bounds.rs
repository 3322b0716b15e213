//! Axis-aligned bounding boxes around a radius
//!
//! The box is a cheap pre-filter: every point within the radius lies inside
//! it, but not every point inside it lies within the radius.

use crate::constants::geo::KM_PER_DEGREE_LAT;
use crate::geo::{Coordinates, Radius};
use serde::{Deserialize, Serialize};

/// North/south latitude and east/west longitude bounds in degrees
///
/// A box whose `south > north` (or `west > east`) is unconstrained on that
/// axis. [`bounding_box`] itself collapses to the full range instead, so the
/// inverted form only comes from callers that build boxes by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Whole-globe box
    pub const WORLD: Self = Self {
        north: 90.0,
        south: -90.0,
        east: 180.0,
        west: -180.0,
    };

    /// Whether the latitude bounds cover the whole globe
    pub fn spans_all_latitudes(&self) -> bool {
        self.south > self.north || (self.south <= -90.0 && self.north >= 90.0)
    }

    /// Whether the longitude bounds cover the whole globe
    pub fn spans_all_longitudes(&self) -> bool {
        self.west > self.east || (self.west <= -180.0 && self.east >= 180.0)
    }

    /// Check whether a point falls inside the box
    pub fn contains(&self, point: Coordinates) -> bool {
        let lat_ok = self.south > self.north || (self.south..=self.north).contains(&point.lat);
        let lng_ok = self.west > self.east || (self.west..=self.east).contains(&point.lng);
        lat_ok && lng_ok
    }
}

/// Compute the bounding box enclosing a radius
///
/// Latitude delta is `distance / km-per-degree`. Longitude delta divides by
/// the per-degree arc at the most poleward latitude the box reaches, since
/// meridians converge there and a degree of longitude is shortest.
///
/// If the box would reach past a pole, both axes collapse to the full range
/// (a cap over the pole covers every longitude). If only the longitude bounds
/// cross the antimeridian, longitude alone collapses to [-180, 180].
pub fn bounding_box(radius: &Radius) -> BoundingBox {
    let origin = radius.origin;
    let delta_lat = radius.distance_km() / KM_PER_DEGREE_LAT;

    let north = origin.lat + delta_lat;
    let south = origin.lat - delta_lat;

    if north > 90.0 || south < -90.0 {
        return BoundingBox::WORLD;
    }

    let poleward_lat = north.abs().max(south.abs());
    let km_per_degree_lng = KM_PER_DEGREE_LAT * poleward_lat.to_radians().cos();
    if km_per_degree_lng <= 0.0 {
        return BoundingBox::WORLD;
    }
    let delta_lng = radius.distance_km() / km_per_degree_lng;

    let east = origin.lng + delta_lng;
    let west = origin.lng - delta_lng;

    let (east, west) = if east > 180.0 || west < -180.0 {
        (180.0, -180.0)
    } else {
        (east, west)
    };

    BoundingBox {
        north,
        south,
        east,
        west,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DistanceUnit;

    fn la() -> Coordinates {
        Coordinates::new(34.0522, -118.2437)
    }

    #[test]
    fn test_normal_case() {
        let bounds = bounding_box(&Radius::new(la(), 100.0));

        assert!(bounds.north > la().lat);
        assert!(bounds.south < la().lat);
        assert!(bounds.east > la().lng);
        assert!(bounds.west < la().lng);
        // ~0.9 degrees of latitude each way
        assert!((bounds.north - la().lat - 0.899).abs() < 0.01);
    }

    #[test]
    fn test_small_radius_stays_close() {
        let origin = Coordinates::new(0.0, 0.0);
        let bounds = bounding_box(&Radius::new(origin, 1.0));

        assert!((bounds.north - origin.lat).abs() < 0.1);
        assert!((bounds.south - origin.lat).abs() < 0.1);
        assert!((bounds.east - origin.lng).abs() < 0.1);
        assert!((bounds.west - origin.lng).abs() < 0.1);
    }

    #[test]
    fn test_equator_is_symmetric() {
        let bounds = bounding_box(&Radius::new(Coordinates::new(0.0, 0.0), 100.0));
        assert!(bounds.north > 0.0);
        assert!(bounds.south < 0.0);
        assert!((bounds.north + bounds.south).abs() < 1e-9);
        assert!((bounds.east + bounds.west).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_latitude_near_pole() {
        let bounds = bounding_box(&Radius::new(Coordinates::new(89.0, 0.0), 500.0));
        assert_eq!(bounds.north, 90.0);
        assert_eq!(bounds.south, -90.0);
        assert!(bounds.spans_all_latitudes());
        assert!(bounds.spans_all_longitudes());
    }

    #[test]
    fn test_wraps_longitude_at_antimeridian() {
        let bounds = bounding_box(&Radius::new(Coordinates::new(0.0, 179.0), 500.0));
        assert_eq!(bounds.west, -180.0);
        assert_eq!(bounds.east, 180.0);
        assert!(bounds.spans_all_longitudes());
        // latitude stays constrained
        assert!(!bounds.spans_all_latitudes());
        assert!(bounds.north < 5.0);
    }

    #[test]
    fn test_miles_larger_than_kilometers() {
        let km = bounding_box(&Radius::new(la(), 100.0));
        let mi = bounding_box(&Radius::with_unit(la(), 100.0, DistanceUnit::Miles));
        assert!(mi.north > km.north);
        assert!(mi.south < km.south);
        assert!(mi.east > km.east);
        assert!(mi.west < km.west);
    }

    #[test]
    fn test_contains() {
        let bounds = bounding_box(&Radius::new(la(), 100.0));
        assert!(bounds.contains(la()));
        assert!(!bounds.contains(Coordinates::new(37.7749, -122.4194)));
    }

    #[test]
    fn test_inverted_bounds_are_unconstrained() {
        let bounds = BoundingBox {
            north: -10.0,
            south: 10.0,
            east: 5.0,
            west: -5.0,
        };
        assert!(bounds.contains(Coordinates::new(80.0, 0.0)));
        assert!(!bounds.contains(Coordinates::new(80.0, 50.0)));
        assert!(bounds.spans_all_latitudes());
    }
}
