//! # HemoLink Engine Benchmarks
//!
//! Performance validation for the engine's documented claims:
//!
//! | Subsystem | Claim | Target |
//! |-----------|-------|--------|
//! | hl-01 Geo Index | O(1) upsert, ring-bounded query | < 5ms at 50k donors |
//! | hl-01 Geo Index | Startup bulk load | < 100ms for 10k donors |
//! | hl-02 Matching | End-to-end match at city scale | < 10ms |
//! | hl-04 Lifecycle | Submission incl. snapshot and stores | < 20ms |

// Allow excessive nesting in benchmark code
#![allow(clippy::excessive_nesting)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;
use tokio::runtime::Runtime;
use uuid::Uuid;

use hl_01_geo_index::{haversine_km, BulkEntry, GeoIndex, GeoIndexConfig};
use hl_02_matching::{MatchQuery, MatchingApi, NearbyQuery};
use hl_03_donor_registry::RegistryApi;
use hl_04_request_lifecycle::LifecycleApi;
use hl_tests::fixtures;
use shared_types::{BloodType, BloodTypeSet, Coordinate, Deadline, DonorId};

// ============================================================================
// HL-01: Geo Index Benchmarks
// Claim: upserts and removals are O(1); a query touches only the rings the
// radius demands, not the whole population
// ============================================================================

fn random_entries(count: usize) -> Vec<BulkEntry> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| BulkEntry {
            donor_id: DonorId(Uuid::new_v4()),
            location: Coordinate::new(
                40.0 + rng.gen_range(-1.5..1.5),
                -74.0 + rng.gen_range(-1.5..1.5),
            )
            .expect("generated coordinate is in range"),
            blood_type: BloodType::ALL[i % BloodType::ALL.len()],
        })
        .collect()
}

fn bench_geo_index_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("hl-01-geo-index");
    group.measurement_time(Duration::from_secs(10));

    // The distance kernel every query result leans on.
    let origin = Coordinate::new(40.0, -74.0).expect("valid coordinate");
    let remote = Coordinate::new(40.7, -73.5).expect("valid coordinate");
    group.bench_function("haversine_distance_single", |b| {
        b.iter(|| black_box(haversine_km(origin, remote)))
    });

    // One donor bouncing between two cells of a populated index.
    let index = GeoIndex::new(GeoIndexConfig::default()).expect("default config");
    index.bulk_load(random_entries(10_000));
    let nomad = DonorId(Uuid::new_v4());
    let here = Coordinate::new(40.0, -74.0).expect("valid coordinate");
    let there = Coordinate::new(41.5, -74.0).expect("valid coordinate");
    group.bench_function("upsert_relocation", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let location = if flip { here } else { there };
            black_box(index.upsert(nomad, location, BloodType::OPos))
        })
    });

    // Query latency as the indexed population grows.
    for donor_count in [1_000, 10_000, 50_000] {
        let index = GeoIndex::new(GeoIndexConfig::default()).expect("default config");
        index.bulk_load(random_entries(donor_count));

        group.throughput(Throughput::Elements(donor_count as u64));
        group.bench_with_input(
            BenchmarkId::new("query_radius_50km", donor_count),
            &index,
            |b, index| {
                b.iter(|| {
                    let hits = index
                        .query(origin, 50.0, BloodTypeSet::ALL, Deadline::NONE)
                        .expect("query within limits");
                    black_box(hits.len())
                })
            },
        );
    }

    // The startup replay path.
    let entries = random_entries(10_000);
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("bulk_load_10k", |b| {
        b.iter(|| {
            let index = GeoIndex::new(GeoIndexConfig::default()).expect("default config");
            black_box(index.bulk_load(entries.clone()))
        })
    });

    group.finish();
}

// ============================================================================
// HL-02: Matching Benchmarks
// Claim: a city-scale match (locate, dedupe, rank, hydrate) completes in
// single-digit milliseconds
// ============================================================================

fn bench_matching_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("hl-02-matching");
    group.measurement_time(Duration::from_secs(10));

    let rt = Runtime::new().expect("tokio runtime");
    let engine = fixtures::engine();
    rt.block_on(async {
        let mut rng = rand::thread_rng();
        for i in 0..2_000usize {
            let email = format!("bench-{i}@example.org");
            let lat = 40.0 + rng.gen_range(-0.5..0.5);
            let lng = -74.0 + rng.gen_range(-0.5..0.5);
            engine
                .registry()
                .register(
                    &fixtures::operator(),
                    fixtures::donor_at(&email, BloodType::ALL[i % 8], lat, lng),
                )
                .await
                .expect("bench donor registers");
        }
    });

    group.bench_function("match_donors_city_scale", |b| {
        b.iter(|| {
            let hits = engine
                .matching()
                .match_donors(MatchQuery {
                    origin: fixtures::coord(40.0, -74.0),
                    blood_type: BloodType::OPos,
                    radius_km: 50.0,
                    max_results: None,
                    timeout: None,
                })
                .expect("query within limits");
            black_box(hits.len())
        })
    });

    group.bench_function("nearby_donors_city_scale", |b| {
        b.iter(|| {
            let donors = engine
                .matching()
                .nearby_donors(NearbyQuery {
                    origin: fixtures::coord(40.0, -74.0),
                    radius_km: None,
                    max_results: Some(100),
                    timeout: None,
                })
                .expect("query within limits");
            black_box(donors.len())
        })
    });

    group.finish();
}

// ============================================================================
// HL-04: Request Lifecycle Benchmarks
// Claim: a full submission (validate, snapshot, blob and record writes)
// stays interactive
// ============================================================================

fn bench_submission_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("hl-04-request-lifecycle");
    group.measurement_time(Duration::from_secs(10));

    let rt = Runtime::new().expect("tokio runtime");
    let engine = fixtures::engine();
    rt.block_on(async {
        for i in 0..500 {
            let email = format!("pool-{i}@example.org");
            let lat = 40.0 + (i as f64) * 0.0005;
            engine
                .registry()
                .register(
                    &fixtures::operator(),
                    fixtures::donor_at(&email, BloodType::ONeg, lat, -74.0),
                )
                .await
                .expect("bench donor registers");
        }
    });

    group.bench_function("submit_full_pipeline", |b| {
        b.iter(|| {
            let receipt = rt
                .block_on(engine.lifecycle().submit(
                    &fixtures::operator(),
                    fixtures::request_at(BloodType::ONeg, 40.1, -74.0),
                    fixtures::pdf_document(2_048),
                ))
                .expect("submission accepted");
            black_box(receipt.snapshot.donors.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_geo_index_operations,
    bench_matching_pipeline,
    bench_submission_pipeline,
);

criterion_main!(benches);
