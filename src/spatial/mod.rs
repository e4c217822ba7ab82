//! Spherical geometry for paths, corridors, and territory polygons

pub mod area;
pub mod buffer;
pub mod polygon;
pub mod sphere;

pub use area::polygon_area_m2;
pub use buffer::buffer_path;
pub use polygon::GroundPolygon;
