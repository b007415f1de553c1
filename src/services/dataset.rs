use crate::models::CenterRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Columns without which no search can run
pub const REQUIRED_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

/// Errors that can occur while loading the center dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(String),
}

/// One raw spreadsheet row, before cleanup
#[derive(Debug, Deserialize)]
struct CenterRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Bereich", default)]
    category: String,
    #[serde(rename = "Zentrum", default)]
    center: Option<String>,
    #[serde(rename = "Anzahl_Aerzte", alias = "Anzahl Ärzte", default, deserialize_with = "csv::invalid_option")]
    doctor_count: Option<f64>,
    #[serde(rename = "Strasse", default)]
    street: String,
    #[serde(rename = "PLZ", default)]
    postal_code: String,
    #[serde(rename = "Stadt", default)]
    city: String,
    #[serde(rename = "Latitude", deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
}

impl From<CenterRow> for CenterRecord {
    fn from(row: CenterRow) -> Self {
        CenterRecord {
            name: row.name,
            category: row.category,
            center: row.center.filter(|c| !c.is_empty()),
            // Spreadsheet exports often write integer counts as "3.0"
            doctor_count: row
                .doctor_count
                .filter(|c| c.is_finite() && *c >= 0.0)
                .map(|c| c.round() as u32),
            street: row.street,
            postal_code: normalize_postal_code(&row.postal_code),
            city: row.city,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Strip a trailing ".0" left by float-typed postal codes
fn normalize_postal_code(raw: &str) -> String {
    raw.strip_suffix(".0")
        .filter(|digits| digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(raw)
        .to_string()
}

/// Summary of a dataset load, for startup logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub total: usize,
    pub missing_coordinates: usize,
    pub out_of_range: usize,
}

/// Parse a configured delimiter string into a CSV delimiter byte
pub fn parse_delimiter(delimiter: &str) -> Result<u8, DatasetError> {
    match delimiter.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if delimiter == "\\t" => Ok(b'\t'),
        _ => Err(DatasetError::InvalidDelimiter(delimiter.to_string())),
    }
}

/// Load the center dataset from a CSV file
pub fn load_centers<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Vec<CenterRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Loading centers from {}", path.display());
    load_centers_from_reader(file, delimiter)
}

/// Load the center dataset from any CSV source
///
/// Fails if the header lacks a Latitude or Longitude column. Rows whose
/// coordinates are empty, unparsable or out of range are kept; they simply
/// never match a search.
pub fn load_centers_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<CenterRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CenterRow>() {
        records.push(CenterRecord::from(row?));
    }

    let stats = dataset_stats(&records);
    tracing::info!("Loaded {} centers", stats.total);
    if stats.missing_coordinates > 0 {
        tracing::warn!("{} centers have no coordinates and will never match", stats.missing_coordinates);
    }
    if stats.out_of_range > 0 {
        tracing::warn!("{} centers have out-of-range coordinates and will never match", stats.out_of_range);
    }

    Ok(records)
}

/// Count records by coordinate quality
pub fn dataset_stats(records: &[CenterRecord]) -> DatasetStats {
    let mut stats = DatasetStats {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match (record.latitude, record.longitude) {
            (Some(_), Some(_)) if record.coordinates().is_none() => stats.out_of_range += 1,
            (Some(_), Some(_)) => {}
            _ => stats.missing_coordinates += 1,
        }
    }
    stats
}
