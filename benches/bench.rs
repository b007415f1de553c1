// Criterion benchmarks for Center Finder

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use center_finder::core::{
    build_map_view, find_nearby, CenterFinder,
    distance::geodesic_distance_km,
};
use center_finder::models::{CenterRecord, ReferencePoint, SearchParams};

fn create_center(id: usize, lat: f64, lon: f64) -> CenterRecord {
    CenterRecord {
        name: format!("Praxis {}", id),
        category: "Augenheilkunde".to_string(),
        center: if id % 4 == 0 { Some("MVZ".to_string()) } else { None },
        doctor_count: Some((id % 5) as u32 + 1),
        street: format!("Hauptstr. {}", id % 200),
        postal_code: format!("{:05}", 10000 + id % 89999),
        city: "Musterstadt".to_string(),
        // Every tenth row was never geocoded
        latitude: if id % 10 == 0 { None } else { Some(lat) },
        longitude: Some(lon),
    }
}

/// Spread centers over roughly the extent of Germany
fn create_dataset(count: usize) -> Vec<CenterRecord> {
    (0..count)
        .map(|i| {
            let lat = 47.3 + (i % 97) as f64 * 0.09;
            let lon = 5.9 + (i % 89) as f64 * 0.10;
            create_center(i, lat, lon)
        })
        .collect()
}

fn bench_geodesic_distance(c: &mut Criterion) {
    c.bench_function("geodesic_distance", |b| {
        b.iter(|| {
            geodesic_distance_km(
                black_box(50.9413),
                black_box(6.9583),
                black_box(50.6980),
                black_box(7.1020),
            )
        });
    });
}

fn bench_find_nearby(c: &mut Criterion) {
    let reference = ReferencePoint::new(50.9413, 6.9583);
    let mut group = c.benchmark_group("find_nearby");

    for size in [1_000, 10_000, 50_000] {
        let records = create_dataset(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| find_nearby(black_box(&reference), black_box(records), black_box(50.0)));
        });
    }

    group.finish();
}

fn bench_search_and_map(c: &mut Criterion) {
    let finder = CenterFinder::new(create_dataset(10_000));
    let reference = ReferencePoint::new(50.9413, 6.9583);
    let params = SearchParams { radius_km: 100.0, show_radius: true };

    c.bench_function("search_and_map_10k", |b| {
        b.iter(|| {
            let result = finder.search(black_box(&reference), black_box(&params));
            build_map_view(&reference, &result.centers, &params)
        });
    });
}

criterion_group!(benches, bench_geodesic_distance, bench_find_nearby, bench_search_and_map);
criterion_main!(benches);
