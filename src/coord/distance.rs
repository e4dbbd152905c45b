//! Haversine distance and proximity searches
//!
//! All distances are great-circle distances in kilometers on a sphere of
//! radius [`EARTH_RADIUS_KM`]. Inputs are assumed to be valid coordinates;
//! validation happens where requests enter the system.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::{Coordinates, Located};

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in kilometers, in `[0, PI * EARTH_RADIUS_KM]`
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = p2.lon.to_radians() - p1.lon.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push a just past 1 for antipodal points
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Find every point within `max_distance_km` of `center`
///
/// Points whose coordinates are exactly equal to `center` are skipped, even
/// when they belong to a different record. The comparison is plain float
/// equality, not a zero-distance check. Input order is preserved.
pub fn find_within_radius<T: Located>(
    points: &[T],
    center: Coordinates,
    max_distance_km: f64,
) -> Vec<&T> {
    points
        .iter()
        .filter(|p| {
            let coords = p.coordinates();
            !coords.same_as(&center) && haversine_distance(center, coords) <= max_distance_km
        })
        .collect()
}

/// Find every unordered pair of points at most `max_distance_km` apart
///
/// Each pair is considered once, as `(points[i], points[j])` with `i < j`.
/// Output is ordered by `i`, then `j`.
pub fn find_all_pairs_within<T: Located>(points: &[T], max_distance_km: f64) -> Vec<(&T, &T)> {
    let mut pairs = Vec::new();

    for (i, first) in points.iter().enumerate() {
        let a = first.coordinates();
        for second in &points[i + 1..] {
            if haversine_distance(a, second.coordinates()) <= max_distance_km {
                pairs.push((first, second));
            }
        }
    }

    pairs
}
