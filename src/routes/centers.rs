use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;
use validator::Validate;
use crate::core::{build_map_view, SearchResult};
use crate::models::{ErrorResponse, HealthResponse, ReferencePoint, SearchParams, SearchRequest, SearchResponse};
use crate::routes::AppState;
use crate::services::{export_csv, ExportError, GeocodeError, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};

/// Message shown when the geocoder has no match for the address
pub const NOT_FOUND_MESSAGE: &str = "Address could not be found. Please try again.";

/// Reasons a search request can fail
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", NOT_FOUND_MESSAGE)]
    AddressNotFound,

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl SearchError {
    fn kind(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "Validation failed",
            SearchError::AddressNotFound => "Address not found",
            SearchError::Geocode(_) => "Geocoding failed",
            SearchError::Export(_) => "Export failed",
        }
    }
}

impl ResponseError for SearchError {
    fn status_code(&self) -> StatusCode {
        match self {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::AddressNotFound => StatusCode::NOT_FOUND,
            SearchError::Geocode(_) => StatusCode::BAD_GATEWAY,
            SearchError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// A search that resolved its address and ran the proximity filter
#[derive(Debug)]
pub struct CompletedSearch {
    pub address: String,
    pub reference: ReferencePoint,
    pub params: SearchParams,
    pub result: SearchResult,
}

/// Configure all center-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/centers/search", web::post().to(search_centers))
        .route("/centers/export", web::get().to(export_centers));
}

/// Validate, geocode and filter
///
/// The proximity filter only runs once the address has resolved.
pub async fn run_search(state: &AppState, req: &SearchRequest) -> Result<CompletedSearch, SearchError> {
    req.validate()
        .map_err(|errors| SearchError::Validation(errors.to_string()))?;

    let address = req.address.trim();
    if address.is_empty() {
        return Err(SearchError::Validation("address must not be blank".to_string()));
    }

    // NaN passes the range check because every comparison with it is false
    let radius_km = req.radius_km.unwrap_or(state.default_radius_km);
    if !radius_km.is_finite() {
        return Err(SearchError::Validation(format!("radiusKm must be a number, got {}", radius_km)));
    }

    let params = SearchParams {
        radius_km,
        show_radius: req.show_radius,
    };

    let reference = match state.geocoder.geocode(address).await {
        Ok(Some(point)) => point,
        Ok(None) => return Err(SearchError::AddressNotFound),
        Err(e) => {
            tracing::error!("Failed to geocode {:?}: {}", address, e);
            return Err(e.into());
        }
    };

    let result = state.finder.search(&reference, &params);

    tracing::info!(
        "{} centers found within {} km of {:?}",
        result.centers.len(),
        params.radius_km,
        address
    );

    Ok(CompletedSearch {
        address: address.to_string(),
        reference,
        params,
        result,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.finder.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        centers_loaded: state.finder.len(),
        geocode_cache_entries: state.geocoder.cache().stats().entries,
        timestamp: chrono::Utc::now(),
    })
}

/// Search centers endpoint
///
/// POST /api/v1/centers/search
///
/// Request body:
/// ```json
/// {
///   "address": "Bahnhofstrasse 1, Zürich",
///   "radiusKm": 50,
///   "showRadius": true
/// }
/// ```
async fn search_centers(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> Result<HttpResponse, SearchError> {
    let search = run_search(&state, &req).await?;

    let map = build_map_view(&search.reference, &search.result.centers, &search.params);
    let response = SearchResponse {
        search_id: uuid::Uuid::new_v4().to_string(),
        address: search.address,
        reference: search.reference,
        radius_km: search.params.radius_km,
        count: search.result.centers.len(),
        centers: search.result.centers,
        map,
    };

    tracing::debug!("Search {} returned {} centers", response.search_id, response.count);

    Ok(HttpResponse::Ok().json(response))
}

/// Download the filtered centers as CSV
///
/// GET /api/v1/centers/export?address={address}&radiusKm={radius}
async fn export_centers(
    state: web::Data<AppState>,
    query: web::Query<SearchRequest>,
) -> Result<HttpResponse, SearchError> {
    let search = run_search(&state, &query).await?;
    let body = export_csv(&search.result.centers)?;

    Ok(HttpResponse::Ok()
        .content_type(EXPORT_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(body))
}
