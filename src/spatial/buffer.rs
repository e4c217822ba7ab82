//! Buffered-path polygon construction
//!
//! Turns an ordered run path into the closed corridor polygon that the
//! run "claims" on the ground: every vertex is pushed out perpendicular
//! to the local direction of travel, 8 m (configurable) to each side, and
//! the two offset chains are stitched into one ring.
//!
//! Paths crossing the antimeridian or near the poles are out of scope;
//! offsets there would be distorted rather than wrong-but-crashing.

use std::f64::consts::FRAC_PI_2;

use crate::core::error::{GameError, Result};
use crate::core::types::GeoPoint;
use crate::spatial::polygon::GroundPolygon;
use crate::spatial::sphere::{destination, local_bearing_rad};

/// Build the closed corridor polygon around an ordered path
///
/// For each vertex the local bearing is taken from the previous to the
/// next vertex (clamped at the ends), and the vertex is offset by
/// `buffer_m` at bearing − 90° (left) and bearing + 90° (right). The ring
/// is left offsets in traversal order, right offsets reversed, then the
/// first left offset again to close. An N-point path therefore yields
/// `2N + 1` ring vertices.
///
/// Fails with [`GameError::InsufficientPoints`] for fewer than 2 points.
pub fn buffer_path(points: &[GeoPoint], buffer_m: f64) -> Result<GroundPolygon> {
    if points.len() < 2 {
        return Err(GameError::InsufficientPoints(points.len()));
    }

    let mut left: Vec<[f64; 2]> = Vec::with_capacity(points.len());
    let mut right: Vec<[f64; 2]> = Vec::with_capacity(points.len());

    for (i, p) in points.iter().enumerate() {
        let prev = &points[i.saturating_sub(1)];
        let next = &points[(i + 1).min(points.len() - 1)];

        let bearing = local_bearing_rad(prev.lat, prev.lng, next.lat, next.lng);

        let (l_lat, l_lng) = destination(p.lat, p.lng, bearing - FRAC_PI_2, buffer_m);
        let (r_lat, r_lng) = destination(p.lat, p.lng, bearing + FRAC_PI_2, buffer_m);

        left.push([l_lng, l_lat]);
        right.push([r_lng, r_lat]);
    }

    let first_left = left[0];
    let mut ring = left;
    ring.extend(right.into_iter().rev());
    ring.push(first_left);

    Ok(GroundPolygon::from_ring(ring))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::sphere::haversine_distance_m;
    use chrono::{Duration, TimeZone, Utc};

    fn path(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| {
                GeoPoint::new(*lat, *lng, None, t0 + Duration::seconds(i as i64 * 10))
            })
            .collect()
    }

    #[test]
    fn test_too_few_points_rejected() {
        let p = path(&[(48.85, 2.35)]);
        assert!(matches!(
            buffer_path(&p, 8.0),
            Err(GameError::InsufficientPoints(1))
        ));
        assert!(matches!(
            buffer_path(&[], 8.0),
            Err(GameError::InsufficientPoints(0))
        ));
    }

    #[test]
    fn test_ring_closed_with_expected_vertex_count() {
        let p = path(&[(48.85, 2.35), (48.8502, 2.3502), (48.8504, 2.3501)]);
        let poly = buffer_path(&p, 8.0).unwrap();
        // 2 * N + closing vertex
        assert_eq!(poly.ring().len(), 2 * p.len() + 1);
        assert!(poly.is_closed());
        assert!(poly.is_valid_ring());
    }

    #[test]
    fn test_corridor_width_matches_buffer() {
        // Straight northbound path; left/right offsets of a middle vertex
        // should sit ~2 * buffer apart.
        let p = path(&[(48.85, 2.35), (48.851, 2.35), (48.852, 2.35)]);
        let poly = buffer_path(&p, 8.0).unwrap();
        let ring = poly.ring();
        let n = p.len();
        // left[i] pairs with right[i] at ring[2n - 1 - i]
        let [l_lng, l_lat] = ring[1];
        let [r_lng, r_lat] = ring[2 * n - 2];
        let width = haversine_distance_m(l_lat, l_lng, r_lat, r_lng);
        assert!((width - 16.0).abs() < 0.1, "corridor width {width}");
    }

    #[test]
    fn test_duplicate_consecutive_points_do_not_crash() {
        let p = path(&[(48.85, 2.35), (48.85, 2.35), (48.8502, 2.3501)]);
        let poly = buffer_path(&p, 8.0).unwrap();
        assert!(poly.is_closed());
        assert!(poly.ring().iter().all(|[lng, lat]| lng.is_finite() && lat.is_finite()));
    }
}
