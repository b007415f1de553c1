use geo::{GeodesicDistance, Point};
use crate::models::BoundingBox;

/// Calculate the geodesic distance between two points in kilometers
///
/// Uses Karney's algorithm on the WGS84 ellipsoid, so results agree with
/// the usual GIS tooling to well under a meter.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn geodesic_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let a = Point::new(lon1, lat1);
    let b = Point::new(lon2, lat2);

    a.geodesic_distance(&b) / 1000.0
}

/// Calculate a bounding box around a center point
///
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude).
/// Used to fit the map viewport to the radius circle.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;

    // Clamp near the poles where cos(lat) goes to zero
    let lon_delta = (radius_km / (111.0 * lat.to_radians().cos().abs().max(1e-6))).min(180.0);

    BoundingBox {
        min_lat: (lat - lat_delta).max(-90.0),
        max_lat: (lat + lat_delta).min(90.0),
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}
