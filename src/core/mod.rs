// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod finder;
pub mod map;

pub use distance::{geodesic_distance_km, calculate_bounding_box};
pub use filters::{compute_distances, filter_within_radius, find_nearby};
pub use finder::{CenterFinder, SearchResult};
pub use map::{build_map_view, MapView, MapMarker, RadiusCircle};
