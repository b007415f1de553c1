use std::sync::Arc;
use crate::core::filters::find_nearby;
use crate::models::{CenterRecord, NearbyCenter, ReferencePoint, SearchParams};

/// Result of a proximity search
#[derive(Debug)]
pub struct SearchResult {
    pub centers: Vec<NearbyCenter>,
    pub total_records: usize,
}

/// Search orchestrator over the loaded reference dataset
///
/// The dataset is immutable once loaded and shared between requests.
#[derive(Debug, Clone)]
pub struct CenterFinder {
    records: Arc<[CenterRecord]>,
}

impl CenterFinder {
    pub fn new(records: Vec<CenterRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Number of records in the dataset, including ones without coordinates
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CenterRecord] {
        &self.records
    }

    /// Find all centers within `params.radius_km` of `reference`
    ///
    /// Results keep the dataset order; they are not sorted by distance.
    pub fn search(&self, reference: &ReferencePoint, params: &SearchParams) -> SearchResult {
        let centers = find_nearby(reference, &self.records, params.radius_km);

        tracing::debug!(
            "{} of {} centers within {} km of ({}, {})",
            centers.len(),
            self.records.len(),
            params.radius_km,
            reference.latitude,
            reference.longitude
        );

        SearchResult {
            centers,
            total_records: self.records.len(),
        }
    }
}
