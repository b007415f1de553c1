// Service exports
pub mod cache;
pub mod dataset;
pub mod export;
pub mod geocoder;

pub use cache::{GeocodeCache, CacheKey, CacheStats};
pub use dataset::{load_centers, load_centers_from_reader, parse_delimiter, dataset_stats, DatasetError, DatasetStats};
pub use export::{export_csv, ExportError, EXPORT_FILE_NAME, EXPORT_CONTENT_TYPE};
pub use geocoder::{Geocoder, GeocodeError, NominatimClient};
