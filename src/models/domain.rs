use serde::{Deserialize, Serialize};

/// One medical center row from the reference dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterRecord {
    pub name: String,
    /// Specialty area ("Bereich")
    pub category: String,
    /// Institution the practice belongs to ("Zentrum")
    #[serde(default)]
    pub center: Option<String>,
    #[serde(rename = "doctorCount", default)]
    pub doctor_count: Option<u32>,
    pub street: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub city: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CenterRecord {
    /// Street, postal code and city joined the way the dataset prints them
    pub fn full_address(&self) -> String {
        format!("{}, {} {}", self.street, self.postal_code, self.city)
    }

    /// Both coordinates, if present and inside the valid WGS84 range
    ///
    /// Out-of-range values are treated the same as missing ones.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if is_valid_coordinate(lat, lon) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Latitude within [-90, 90] and longitude within [-180, 180]
#[inline]
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Resolved location of the searched address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A record paired with its distance from the reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyCenter {
    #[serde(flatten)]
    pub record: CenterRecord,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLon")]
    pub min_lon: f64,
    #[serde(rename = "maxLon")]
    pub max_lon: f64,
}

impl BoundingBox {
    /// Degenerate box around a single point
    pub fn around(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        }
    }

    /// Grow the box so it contains the given point
    pub fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }
}

/// Parameters of a single search after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub radius_km: f64,
    pub show_radius: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            radius_km: 50.0,
            show_radius: false,
        }
    }
}
