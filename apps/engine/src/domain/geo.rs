//! Great-circle geometry over a spherical Earth.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Haversine formula; accurate to well under the scoring granularity for
/// any pair of points on Earth.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // Clamp guards against floating-point drift just past 1.0 for
    // near-antipodal pairs.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
