// Unit tests for the proximity filter

use center_finder::core::{
    distance::geodesic_distance_km,
    filters::{compute_distances, filter_within_radius, find_nearby},
};
use center_finder::models::{CenterRecord, ReferencePoint};

const REF_LAT: f64 = 50.9413;
const REF_LON: f64 = 6.9583;

fn create_test_record(name: &str, lat: Option<f64>, lon: Option<f64>) -> CenterRecord {
    CenterRecord {
        name: name.to_string(),
        category: "Augenheilkunde".to_string(),
        center: None,
        doctor_count: None,
        street: "Domkloster 3".to_string(),
        postal_code: "50667".to_string(),
        city: "Köln".to_string(),
        latitude: lat,
        longitude: lon,
    }
}

/// Latitude due north of the reference point at the given geodesic distance
fn latitude_at_distance(km: f64) -> f64 {
    let (mut lo, mut hi) = (REF_LAT, REF_LAT + 5.0);
    for _ in 0..200 {
        let mid = (lo + hi) / 2.0;
        if geodesic_distance_km(REF_LAT, REF_LON, mid, REF_LON) < km {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

fn grid_records() -> Vec<CenterRecord> {
    let mut records = Vec::new();
    for i in 0..12 {
        for j in 0..12 {
            let lat = REF_LAT - 1.5 + i as f64 * 0.25;
            let lon = REF_LON - 2.0 + j as f64 * 0.35;
            let (lat, lon) = if (i + j) % 7 == 0 { (None, Some(lon)) } else { (Some(lat), Some(lon)) };
            records.push(create_test_record(&format!("{}-{}", i, j), lat, lon));
        }
    }
    records
}

fn names(records: &[(&CenterRecord, f64)]) -> Vec<String> {
    records.iter().map(|(r, _)| r.name.clone()).collect()
}

#[test]
fn test_compute_distances_preserves_length() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = grid_records();

    let annotated = compute_distances(&reference, &records);

    assert_eq!(annotated.len(), records.len());
    for ((record, _), original) in annotated.iter().zip(&records) {
        assert_eq!(record.name, original.name);
    }
}

#[test]
fn test_missing_coordinates_are_always_absent() {
    let records = vec![
        create_test_record("no-lat", None, Some(REF_LON)),
        create_test_record("no-lon", Some(REF_LAT), None),
        create_test_record("none", None, None),
    ];

    for reference in [
        ReferencePoint::new(REF_LAT, REF_LON),
        ReferencePoint::new(0.0, 0.0),
        ReferencePoint::new(-33.86, 151.21),
    ] {
        for (_, distance) in compute_distances(&reference, &records) {
            assert!(distance.is_none());
        }
    }
}

#[test]
fn test_filtered_entries_are_within_radius() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = grid_records();

    for radius in [0.0, 5.0, 25.0, 50.0, 100.0, 200.0] {
        let kept = filter_within_radius(compute_distances(&reference, &records), radius);
        for (_, distance) in &kept {
            assert!(*distance <= radius, "{} > {}", distance, radius);
        }
    }
}

#[test]
fn test_smaller_radius_is_subset() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = grid_records();
    let radii = [5.0, 20.0, 50.0, 80.0, 150.0, 200.0];

    for pair in radii.windows(2) {
        let small = names(&filter_within_radius(compute_distances(&reference, &records), pair[0]));
        let large = names(&filter_within_radius(compute_distances(&reference, &records), pair[1]));

        assert!(small.len() <= large.len());
        for name in &small {
            assert!(large.contains(name), "{} missing at radius {}", name, pair[1]);
        }
    }
}

#[test]
fn test_geodesic_symmetry() {
    let points = [(50.9413, 6.9583), (52.5423, 13.3486), (48.1374, 11.5755), (-33.86, 151.21)];
    for &(lat1, lon1) in &points {
        for &(lat2, lon2) in &points {
            let ab = geodesic_distance_km(lat1, lon1, lat2, lon2);
            let ba = geodesic_distance_km(lat2, lon2, lat1, lon1);
            assert!((ab - ba).abs() < 1e-6, "{} vs {}", ab, ba);
        }
    }
}

#[test]
fn test_boundary_is_inclusive() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = vec![create_test_record("edge", Some(51.2205), Some(6.7797))];
    let exact = geodesic_distance_km(REF_LAT, REF_LON, 51.2205, 6.7797);

    let kept = find_nearby(&reference, &records, exact);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].distance_km, exact);
}

#[test]
fn test_three_record_scenario() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = vec![
        create_test_record("10km", Some(latitude_at_distance(10.0)), Some(REF_LON)),
        create_test_record("49.99km", Some(latitude_at_distance(49.99)), Some(REF_LON)),
        create_test_record("50.01km", Some(latitude_at_distance(50.01)), Some(REF_LON)),
    ];

    let kept = find_nearby(&reference, &records, 50.0);

    let kept_names: Vec<_> = kept.iter().map(|c| c.record.name.as_str()).collect();
    assert_eq!(kept_names, vec!["10km", "49.99km"]);
    assert!((kept[0].distance_km - 10.0).abs() < 1e-6);
    assert!((kept[1].distance_km - 49.99).abs() < 1e-6);
}

#[test]
fn test_null_latitude_never_matches() {
    let records = vec![
        create_test_record("null-lat", None, Some(REF_LON)),
        create_test_record("here", Some(REF_LAT), Some(REF_LON)),
    ];

    for reference in [ReferencePoint::new(REF_LAT, REF_LON), ReferencePoint::new(REF_LAT, 0.0)] {
        for radius in [0.0, 50.0, 1_000.0, 25_000.0] {
            let kept = find_nearby(&reference, &records, radius);
            assert!(kept.iter().all(|c| c.record.name != "null-lat"));
        }
    }
}

#[test]
fn test_result_keeps_input_order_not_distance_order() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = vec![
        create_test_record("far", Some(latitude_at_distance(40.0)), Some(REF_LON)),
        create_test_record("near", Some(latitude_at_distance(1.0)), Some(REF_LON)),
        create_test_record("middle", Some(latitude_at_distance(20.0)), Some(REF_LON)),
    ];

    let kept = find_nearby(&reference, &records, 50.0);

    let kept_names: Vec<_> = kept.iter().map(|c| c.record.name.as_str()).collect();
    assert_eq!(kept_names, vec!["far", "near", "middle"]);
}

#[test]
fn test_out_of_range_coordinates_are_excluded() {
    let reference = ReferencePoint::new(REF_LAT, REF_LON);
    let records = vec![create_test_record("bad-lon", Some(REF_LAT), Some(REF_LON + 360.0))];

    let annotated = compute_distances(&reference, &records);

    assert_eq!(annotated.len(), 1);
    assert!(annotated[0].1.is_none());
}
