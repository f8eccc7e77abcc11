//! Great-circle distance on the mean-radius sphere.

use shared_types::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude on the mean-radius sphere (~111.19).
pub const KM_PER_DEG_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Haversine distance between two coordinates, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat().to_radians();
    let lat_b = b.lat().to_radians();
    let dlat = lat_b - lat_a;
    let dlng = (b.lng() - a.lng()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
