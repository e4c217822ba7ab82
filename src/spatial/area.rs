//! Approximate surface area of a closed ground polygon
//!
//! Spherical-excess summation on the WGS-84 semi-major radius. Accurate
//! enough for corridor-sized claims; no guarantees for rings spanning
//! large latitude ranges or crossing the antimeridian (out of scope).

use crate::spatial::polygon::GroundPolygon;
use crate::spatial::sphere::EARTH_RADIUS_WGS84_M;

/// Enclosed area in square meters
///
/// Rings with fewer than 4 vertices return 0.0 by convention; a degenerate
/// claim is worth nothing rather than being an error.
pub fn polygon_area_m2(polygon: &GroundPolygon) -> f64 {
    let ring = polygon.ring();
    if ring.len() < 4 {
        return 0.0;
    }

    let mut sum = 0.0;
    for pair in ring.windows(2) {
        let [lng1, lat1] = pair[0];
        let [lng2, lat2] = pair[1];
        sum += (lng2.to_radians() - lng1.to_radians())
            * (2.0 + lat1.to_radians().sin() + lat2.to_radians().sin());
    }

    (sum * EARTH_RADIUS_WGS84_M * EARTH_RADIUS_WGS84_M / 2.0).abs()
}
