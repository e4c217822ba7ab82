//! Spherical trigonometry primitives: distance, bearing, destination
//!
//! Pure numeric functions on a spherical Earth. Two radius constants are
//! in play: distance uses the mean radius, destination and area math use
//! the WGS-84 semi-major axis. The original backend shipped with this
//! split and saved territories depend on it, so it is kept rather than
//! unified.

/// Mean Earth radius (meters), used for great-circle distance
pub const EARTH_RADIUS_MEAN_M: f64 = 6_371_000.0;

/// WGS-84 semi-major axis (meters), used for destination points and area
pub const EARTH_RADIUS_WGS84_M: f64 = 6_378_137.0;

/// Great-circle distance between two (lat, lng) degree pairs, in meters
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_MEAN_M`].
pub fn haversine_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MEAN_M * c
}

/// Local bearing (radians) of the segment from `(lat1, lng1)` toward
/// `(lat2, lng2)`, using a flat equirectangular approximation
///
/// Good enough at path-vertex scale (tens of meters). A zero-length
/// segment yields `atan2(0, 0) == 0`, i.e. due north, so degenerate
/// duplicate fixes never poison the offset math.
pub fn local_bearing_rad(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let mid_lat = ((lat1 + lat2) / 2.0).to_radians();
    let x = (lng2 - lng1).to_radians() * mid_lat.cos();
    let y = (lat2 - lat1).to_radians();
    x.atan2(y)
}

/// Destination point after moving `distance_m` meters from `(lat, lng)`
/// along `bearing_rad`, on a sphere of radius [`EARTH_RADIUS_WGS84_M`]
///
/// Returns `(lat, lng)` in degrees.
pub fn destination(lat: f64, lng: f64, bearing_rad: f64, distance_m: f64) -> (f64, f64) {
    let angular = distance_m / EARTH_RADIUS_WGS84_M;
    let lat_rad = lat.to_radians();
    let lng_rad = lng.to_radians();

    let dest_lat = (lat_rad.sin() * angular.cos()
        + lat_rad.cos() * angular.sin() * bearing_rad.cos())
    .asin();
    let dest_lng = lng_rad
        + (bearing_rad.sin() * angular.sin() * lat_rad.cos())
            .atan2(angular.cos() - lat_rad.sin() * dest_lat.sin());

    (dest_lat.to_degrees(), dest_lng.to_degrees())
}
