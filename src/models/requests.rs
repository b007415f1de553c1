use serde::{Deserialize, Serialize};
use validator::Validate;

/// Smallest radius a search may use, in kilometers
pub const MIN_RADIUS_KM: f64 = 5.0;
/// Largest radius a search may use, in kilometers
pub const MAX_RADIUS_KM: f64 = 200.0;

/// Request to search centers around an address
///
/// Used both as a JSON body and as a query string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(range(min = 5.0, max = 200.0))]
    #[serde(alias = "radius_km", rename = "radiusKm", default)]
    pub radius_km: Option<f64>,
    #[serde(alias = "show_radius", rename = "showRadius", default)]
    pub show_radius: bool,
}

/// Query string of the HTML page; every field is optional because the
/// empty form is rendered before any search has been performed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub address: Option<String>,
    /// Raw form value; a cleared number input arrives as an empty string
    #[serde(alias = "radius_km", rename = "radiusKm", default)]
    pub radius_km: Option<String>,
    #[serde(alias = "show_radius", rename = "showRadius", default)]
    pub show_radius: Option<bool>,
}

impl PageQuery {
    /// The submitted address, if any non-blank one was given
    pub fn submitted_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// The submitted radius, or `default_km` when the field is absent or blank
    pub fn radius_km(&self, default_km: f64) -> Result<f64, String> {
        match self.radius_km.as_deref().map(str::trim) {
            None | Some("") => Ok(default_km),
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| format!("Radius must be a number of kilometers, got {:?}", raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_range_validation() {
        let mut req = SearchRequest {
            address: "Bahnhofstrasse 1, Zürich".to_string(),
            radius_km: Some(50.0),
            show_radius: false,
        };
        assert!(req.validate().is_ok());

        req.radius_km = Some(4.9);
        assert!(req.validate().is_err());

        req.radius_km = Some(200.1);
        assert!(req.validate().is_err());

        req.radius_km = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_address_rejected() {
        let req = SearchRequest {
            address: String::new(),
            radius_km: None,
            show_radius: false,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_deserialize_camel_case_and_defaults() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"address":"Marienplatz 1, München","radiusKm":25}"#).unwrap();
        assert_eq!(req.radius_km, Some(25.0));
        assert!(!req.show_radius);
    }

    #[test]
    fn test_page_query_radius_parsing() {
        let mut query = PageQuery::default();
        assert_eq!(query.radius_km(50.0), Ok(50.0));

        query.radius_km = Some(String::new());
        assert_eq!(query.radius_km(50.0), Ok(50.0));

        query.radius_km = Some(" 75 ".to_string());
        assert_eq!(query.radius_km(50.0), Ok(75.0));

        query.radius_km = Some("weit".to_string());
        assert!(query.radius_km(50.0).is_err());
    }

    #[test]
    fn test_page_query_blank_address_is_not_a_search() {
        let query = PageQuery {
            address: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.submitted_address(), None);
    }
}
