//! Center Finder - finds medical centers near an address
//!
//! This library provides the proximity filter behind the Center Finder
//! service together with the dataset loader, geocoder, map and export
//! collaborators and the HTTP routes that tie them together.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CenterFinder, compute_distances, filter_within_radius, find_nearby, distance::geodesic_distance_km};
pub use crate::models::{CenterRecord, ReferencePoint, NearbyCenter, SearchParams, SearchRequest, SearchResponse};
