//! Great-circle distance and radius filtering

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::geo::{bounding_box, Coordinates, Radius};
use crate::record::Record;

/// Calculate the distance between two points in kilometers (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Records within a radius, paired with their distance in the radius unit
///
/// Candidates are first screened with the radius' bounding box, then kept if
/// their great-circle distance is at most `radius.distance`. The result is
/// sorted nearest-first; equal distances keep their input order.
pub fn nearest<I>(records: I, radius: &Radius) -> Vec<(Record, f64)>
where
    I: IntoIterator<Item = Record>,
{
    let bounds = bounding_box(radius);

    let mut hits: Vec<(Record, f64)> = records
        .into_iter()
        .filter(|record| bounds.contains(record.coordinates()))
        .filter_map(|record| {
            let km = haversine_distance(radius.origin, record.coordinates());
            let distance = radius.unit.from_km(km);
            (distance <= radius.distance).then_some((record, distance))
        })
        .collect();

    // sort_by is stable
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits
}

/// Records within a radius, sorted nearest-first
pub fn filter_radius<I>(records: I, radius: &Radius) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    nearest(records, radius)
        .into_iter()
        .map(|(record, _)| record)
        .collect()
}
