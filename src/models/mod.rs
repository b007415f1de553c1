// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CenterRecord, ReferencePoint, NearbyCenter, BoundingBox, SearchParams, is_valid_coordinate};
pub use requests::{SearchRequest, PageQuery, MIN_RADIUS_KM, MAX_RADIUS_KM};
pub use responses::{SearchResponse, HealthResponse, ErrorResponse};
