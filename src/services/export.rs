use crate::models::NearbyCenter;
use serde::Serialize;
use thiserror::Error;

/// File name offered for the download
pub const EXPORT_FILE_NAME: &str = "Filtered_Centers.csv";

/// Content type of the download
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Errors that can occur while serializing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to finish export: {0}")]
    Flush(String),
}

/// Exported column set, in spreadsheet column order
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Bereich")]
    category: &'a str,
    #[serde(rename = "Zentrum")]
    center: &'a str,
    #[serde(rename = "Strasse")]
    street: &'a str,
    #[serde(rename = "PLZ")]
    postal_code: &'a str,
    #[serde(rename = "Stadt")]
    city: &'a str,
    #[serde(rename = "Distance_km")]
    distance_km: f64,
}

/// Serialize the filtered centers to CSV bytes
///
/// The header row is written even when there are no centers.
pub fn export_csv(centers: &[NearbyCenter]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(["Name", "Bereich", "Zentrum", "Strasse", "PLZ", "Stadt", "Distance_km"])?;
    for center in centers {
        let record = &center.record;
        writer.serialize(ExportRow {
            name: &record.name,
            category: &record.category,
            center: record.center.as_deref().unwrap_or(""),
            street: &record.street,
            postal_code: &record.postal_code,
            city: &record.city,
            distance_km: center.distance_km,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}
