//! HTML search page.
//!
//! One page serves both states: the empty form, and the form plus results
//! once an address has been submitted. Whether a search was performed is
//! decided from the query string alone and handed to the renderer; the
//! "new search" link is just the bare page URL.

use actix_web::{web, HttpResponse};
use crate::core::{build_map_view, MapView};
use crate::core::map::escape_html;
use crate::models::{PageQuery, SearchRequest, MAX_RADIUS_KM, MIN_RADIUS_KM};
use crate::routes::centers::{run_search, SearchError};
use crate::routes::AppState;

/// Values echoed back into the search form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub address: String,
    pub radius_km: f64,
    pub show_radius: bool,
}

/// What to show below the form
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Found {
        count: usize,
        radius_km: f64,
        map: MapView,
        export_url: String,
    },
    Failed(String),
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(search_page));
}

async fn search_page(state: web::Data<AppState>, query: web::Query<PageQuery>) -> HttpResponse {
    let radius = query.radius_km(state.default_radius_km);
    let form = FormState {
        address: query.address.clone().unwrap_or_default(),
        radius_km: radius.clone().unwrap_or(state.default_radius_km),
        show_radius: query.show_radius.unwrap_or(false),
    };

    let outcome = match (query.submitted_address(), radius) {
        (Some(_), Err(message)) => Some(PageOutcome::Failed(message)),
        (Some(address), Ok(_)) => {
            let req = SearchRequest {
                address: address.to_string(),
                radius_km: Some(form.radius_km),
                show_radius: form.show_radius,
            };
            Some(match run_search(&state, &req).await {
                Ok(search) => PageOutcome::Found {
                    count: search.result.centers.len(),
                    radius_km: search.params.radius_km,
                    map: build_map_view(&search.reference, &search.result.centers, &search.params),
                    export_url: export_url(&search.address, search.params.radius_km),
                },
                Err(SearchError::Geocode(e)) => {
                    PageOutcome::Failed(format!("The geocoding service is unavailable: {}", e))
                }
                Err(e) => PageOutcome::Failed(e.to_string()),
            })
        }
        (None, _) => None,
    };

    let searched = outcome.is_some();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&form, searched, outcome.as_ref()))
}

/// Link to the CSV download for a search
pub fn export_url(address: &str, radius_km: f64) -> String {
    format!(
        "/api/v1/centers/export?address={}&radiusKm={}",
        urlencoding::encode(address),
        radius_km
    )
}

/// Render the whole page
///
/// `outcome` is only rendered when `searched` is true.
pub fn render_page(form: &FormState, searched: bool, outcome: Option<&PageOutcome>) -> String {
    let mut body = render_form(form);

    if searched {
        match outcome {
            Some(PageOutcome::Found { count, radius_km, map, export_url }) => {
                body.push_str(&format!(
                    "<p class=\"success\">{} centers found within {} km of your address.</p>\n",
                    count, radius_km
                ));
                body.push_str(&render_map(map));
                body.push_str(&format!(
                    "<p><a class=\"download\" href=\"{}\">Download Filtered Centers (CSV)</a></p>\n",
                    escape_html(export_url)
                ));
            }
            Some(PageOutcome::Failed(message)) => {
                body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(message)));
            }
            None => {}
        }
        body.push_str("<p><a class=\"reset\" href=\"/\">New search</a></p>\n");
    }

    PAGE_TEMPLATE.replace("__BODY__", &body)
}

fn render_form(form: &FormState) -> String {
    format!(
        r#"<form method="get" action="/">
  <label>Enter any address to search around (e.g. Bahnhofstrasse 1, Zürich):
    <input type="text" name="address" value="{address}" size="60">
  </label>
  <label>Radius (km):
    <input type="number" name="radiusKm" min="{min}" max="{max}" step="5" value="{radius}">
  </label>
  <label><input type="checkbox" name="showRadius" value="true"{checked}> Show radius circle</label>
  <button type="submit">Search</button>
</form>
"#,
        address = escape_html(&form.address),
        min = MIN_RADIUS_KM,
        max = MAX_RADIUS_KM,
        radius = form.radius_km,
        checked = if form.show_radius { " checked" } else { "" },
    )
}

fn render_map(map: &MapView) -> String {
    // "</" inside a script block would end it early
    let json = serde_json::to_string(map)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    MAP_TEMPLATE.replace("__MAP_VIEW__", &json)
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Center Finder</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
body { font-family: sans-serif; margin: 2em; }
label { display: block; margin: 0.5em 0; }
#map { width: 900px; height: 600px; }
.success { color: #1a7f37; }
.error { color: #cf222e; }
</style>
</head>
<body>
<h1>Center Finder</h1>
__BODY__</body>
</html>
"#;

const MAP_TEMPLATE: &str = r#"<div id="map"></div>
<script>
const view = __MAP_VIEW__;
const map = L.map('map').setView([view.reference.latitude, view.reference.longitude], view.zoom);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
const pin = (m) => L.circleMarker([m.latitude, m.longitude], { color: m.color, radius: 8 })
  .bindTooltip(m.title)
  .bindPopup(m.popup);
pin(view.reference).addTo(map);
if (view.circle) {
  L.circle([view.circle.latitude, view.circle.longitude], { radius: view.circle.radiusMeters, color: 'red', fill: false }).addTo(map);
}
view.markers.forEach((m) => pin(m).addTo(map));
const b = view.bounds;
if (b.minLat !== b.maxLat || b.minLon !== b.maxLon) {
  map.fitBounds([[b.minLat, b.minLon], [b.maxLat, b.maxLon]]);
}
</script>
"#;
