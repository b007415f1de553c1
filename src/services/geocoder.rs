use crate::models::{is_valid_coordinate, ReferencePoint};
use crate::services::cache::GeocodeCache;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the geocoding service
///
/// An address that simply does not resolve is not an error; see
/// [`Geocoder::geocode`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One search hit as returned by Nominatim
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Nominatim search API client
pub struct NominatimClient {
    base_url: String,
    user_agent: String,
    client: Client,
}

impl NominatimClient {
    /// Create a new Nominatim client
    pub fn new(base_url: String, user_agent: String, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.clone())
            .build()?;

        Ok(Self {
            base_url,
            user_agent,
            client,
        })
    }

    /// Resolve a free-text address to its best match
    ///
    /// Returns `Ok(None)` if the service has no match for the address.
    pub async fn search(&self, address: &str) -> Result<Option<ReferencePoint>, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(address)
        );

        tracing::debug!("Geocoding via {} as {}", url, self.user_agent);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Failed to geocode address: {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse places: {}", e)))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude = parse_coordinate(&place.lat, "lat")?;
        let longitude = parse_coordinate(&place.lon, "lon")?;
        if !is_valid_coordinate(latitude, longitude) {
            return Err(GeocodeError::InvalidResponse(format!(
                "Coordinates out of range: ({}, {})",
                latitude, longitude
            )));
        }

        tracing::debug!(
            "Resolved {:?} to {} ({}, {})",
            address,
            place.display_name.as_deref().unwrap_or("<unnamed>"),
            latitude,
            longitude
        );

        Ok(Some(ReferencePoint::new(latitude, longitude)))
    }
}

fn parse_coordinate(value: &str, field: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidResponse(format!("Invalid {} value: {:?}", field, value)))
}

/// Memoizing geocoder
///
/// Each distinct address is sent to the service at most once per cache
/// lifetime. Errors are not memoized, so a later request retries them.
pub struct Geocoder {
    client: NominatimClient,
    cache: GeocodeCache,
}

impl Geocoder {
    pub fn new(client: NominatimClient, cache: GeocodeCache) -> Self {
        Self { client, cache }
    }

    /// Resolve an address, consulting the memo first
    ///
    /// `Ok(None)` means the address could not be found.
    pub async fn geocode(&self, address: &str) -> Result<Option<ReferencePoint>, GeocodeError> {
        let address = address.trim();

        if let Some(answer) = self.cache.get(address).await {
            return Ok(answer);
        }

        let answer = self.client.search(address).await?;
        self.cache.insert(address, answer).await;

        if answer.is_none() {
            tracing::info!("Address not found: {:?}", address);
        }

        Ok(answer)
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("47.3769", "lat").unwrap(), 47.3769);
        assert_eq!(parse_coordinate(" 8.54 ", "lon").unwrap(), 8.54);
        assert!(parse_coordinate("north", "lat").is_err());
    }

    #[test]
    fn test_place_deserializes_without_display_name() {
        let places: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat":"52.52","lon":"13.40","osm_type":"node"}]"#).unwrap();
        assert_eq!(places[0].lat, "52.52");
        assert!(places[0].display_name.is_none());
    }
}
