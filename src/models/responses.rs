use serde::{Deserialize, Serialize};
use crate::core::map::MapView;
use crate::models::domain::{NearbyCenter, ReferencePoint};

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "searchId")]
    pub search_id: String,
    pub address: String,
    pub reference: ReferencePoint,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub count: usize,
    pub centers: Vec<NearbyCenter>,
    pub map: MapView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "centersLoaded")]
    pub centers_loaded: usize,
    #[serde(rename = "geocodeCacheEntries")]
    pub geocode_cache_entries: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
