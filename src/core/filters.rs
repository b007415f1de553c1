use crate::core::distance::geodesic_distance_km;
use crate::models::{CenterRecord, NearbyCenter, ReferencePoint};

/// Pair every record with its distance from `reference`
///
/// The output has exactly one entry per input record, in input order.
/// Records without usable coordinates get `None`.
pub fn compute_distances<'a>(
    reference: &ReferencePoint,
    records: &'a [CenterRecord],
) -> Vec<(&'a CenterRecord, Option<f64>)> {
    records
        .iter()
        .map(|record| {
            let distance = record.coordinates().map(|(lat, lon)| {
                geodesic_distance_km(reference.latitude, reference.longitude, lat, lon)
            });
            (record, distance)
        })
        .collect()
}

/// Keep the entries at most `radius_km` away (inclusive)
///
/// Entries without a distance are dropped. Relative order is preserved.
pub fn filter_within_radius<'a, I>(annotated: I, radius_km: f64) -> Vec<(&'a CenterRecord, f64)>
where
    I: IntoIterator<Item = (&'a CenterRecord, Option<f64>)>,
{
    annotated
        .into_iter()
        .filter_map(|(record, distance)| distance.map(|d| (record, d)))
        .filter(|(_, distance)| *distance <= radius_km)
        .collect()
}

/// Distance computation and radius filter in one pass, producing owned results
pub fn find_nearby(
    reference: &ReferencePoint,
    records: &[CenterRecord],
    radius_km: f64,
) -> Vec<NearbyCenter> {
    filter_within_radius(compute_distances(reference, records), radius_km)
        .into_iter()
        .map(|(record, distance_km)| NearbyCenter {
            record: record.clone(),
            distance_km,
        })
        .collect()
}
