//! Map view model for a search result.
//!
//! The view is plain data: the HTML page serializes it to JSON and draws it
//! with Leaflet, and the JSON API returns it as-is so other clients can draw
//! their own map.

use serde::{Deserialize, Serialize};
use crate::core::distance::calculate_bounding_box;
use crate::models::{BoundingBox, NearbyCenter, ReferencePoint, SearchParams};

/// Initial zoom level before the viewport is fitted to the bounds
pub const DEFAULT_ZOOM: u8 = 9;

/// Label of the reference marker
pub const REFERENCE_LABEL: &str = "Your Address";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    /// Short hover text
    pub title: String,
    /// HTML popup content, already escaped
    pub popup: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusCircle {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "radiusMeters")]
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub reference: MapMarker,
    pub circle: Option<RadiusCircle>,
    pub markers: Vec<MapMarker>,
    pub bounds: BoundingBox,
    pub zoom: u8,
}

/// Build the map for a search: one reference marker, an optional radius
/// circle and one marker per center, with bounds covering all of them
pub fn build_map_view(
    reference: &ReferencePoint,
    centers: &[NearbyCenter],
    params: &SearchParams,
) -> MapView {
    let mut bounds = BoundingBox::around(reference.latitude, reference.longitude);

    let markers = centers
        .iter()
        .filter_map(|center| {
            let (lat, lon) = center.record.coordinates()?;
            bounds.extend(lat, lon);
            Some(MapMarker {
                latitude: lat,
                longitude: lon,
                title: center.record.name.clone(),
                popup: format_popup(center),
                color: "blue".to_string(),
            })
        })
        .collect();

    let circle = params.show_radius.then(|| {
        bounds = bounds.union(&calculate_bounding_box(
            reference.latitude,
            reference.longitude,
            params.radius_km,
        ));
        RadiusCircle {
            latitude: reference.latitude,
            longitude: reference.longitude,
            radius_meters: params.radius_km * 1000.0,
        }
    });

    MapView {
        reference: MapMarker {
            latitude: reference.latitude,
            longitude: reference.longitude,
            title: REFERENCE_LABEL.to_string(),
            popup: REFERENCE_LABEL.to_string(),
            color: "red".to_string(),
        },
        circle,
        markers,
        bounds,
        zoom: DEFAULT_ZOOM,
    }
}

/// Popup label of a center marker
pub fn format_popup(center: &NearbyCenter) -> String {
    let record = &center.record;
    let mut popup = format!(
        "<b>{}</b><br>Bereich: {}<br>",
        escape_html(&record.name),
        escape_html(&record.category)
    );
    if let Some(zentrum) = record.center.as_deref().filter(|z| !z.is_empty()) {
        popup.push_str(&format!("Zentrum: {}<br>", escape_html(zentrum)));
    }
    if let Some(count) = record.doctor_count {
        popup.push_str(&format!("Ärzte: {}<br>", count));
    }
    popup.push_str(&format!(
        "Adresse: {}<br>Entfernung: {:.1} km",
        escape_html(&record.full_address()),
        center.distance_km
    ));
    popup
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
