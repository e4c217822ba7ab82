//! Closed ground polygons in wire format
//!
//! The wire shape is a single outer ring of `[longitude, latitude]`
//! pairs with the first pair repeated as the last (GeoJSON ring order,
//! no holes). Conversion to [`geo_types::Polygon`] backs the overlap
//! predicate in the territory store.

use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// A closed outer ring of `[lng, lat]` vertices
///
/// Serializes as the bare vertex array, matching the stored territory
/// geometry format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundPolygon {
    ring: Vec<[f64; 2]>,
}

impl GroundPolygon {
    /// Wrap a ring without further checks; callers produce closed rings
    pub fn from_ring(ring: Vec<[f64; 2]>) -> Self {
        Self { ring }
    }

    /// Axis-aligned bounding box as a closed 5-vertex ring
    ///
    /// Used for map viewport queries against the territory store.
    pub fn bounding_box(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            ring: vec![
                [min_lng, min_lat],
                [max_lng, min_lat],
                [max_lng, max_lat],
                [min_lng, max_lat],
                [min_lng, min_lat],
            ],
        }
    }

    pub fn ring(&self) -> &[[f64; 2]] {
        &self.ring
    }

    /// First vertex equals last vertex
    pub fn is_closed(&self) -> bool {
        match (self.ring.first(), self.ring.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Minimum 4 vertices (3 distinct + closing point) and closed:
    /// the threshold below which area and intersection are meaningless
    pub fn is_valid_ring(&self) -> bool {
        self.ring.len() >= 4 && self.is_closed()
    }

    /// Convert to a `geo` polygon for intersection tests
    pub fn to_geo(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .ring
            .iter()
            .map(|[lng, lat]| Coord { x: *lng, y: *lat })
            .collect();
        Polygon::new(LineString::from(coords), vec![])
    }
}
