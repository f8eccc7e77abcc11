//! # Concurrency Integration Tests
//!
//! The engine serves parallel callers with no external locking: these
//! tests drive racing writers and readers through one shared container
//! and assert the invariants that must hold under any interleaving.
//!
//! ## Invariants Tested:
//!
//! 1. Parallel registrations with distinct emails all land; none is lost
//! 2. An email race admits exactly one donor, no matter the interleaving
//! 3. A relocating donor appears in match results exactly once, never
//!    zero times and never twice
//! 4. Concurrent submissions each get their own board entry and record

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hl_02_matching::{MatchQuery, MatchingApi};
    use hl_03_donor_registry::{RegistryApi, RegistryError};
    use hl_04_request_lifecycle::LifecycleApi;
    use shared_types::BloodType;

    use crate::fixtures::{coord, donor_at, engine, operator, pdf_document, request_at};

    // =========================================================================
    // PARALLEL WRITERS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_registrations_all_land() {
        let engine = Arc::new(engine());

        let mut handles = Vec::new();
        for i in 0..32 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                let email = format!("donor-{i}@example.org");
                let lat = 40.0 + (i as f64) * 0.001;
                engine
                    .registry()
                    .register(&operator(), donor_at(&email, BloodType::OPos, lat, -74.0))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(engine.registry().active_donors().len(), 32);
        assert_eq!(engine.geo_index.len(), 32);
        assert_eq!(engine.donor_store.record_count(), 32);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_email_race_admits_exactly_one_donor() {
        let engine = Arc::new(engine());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine
                    .registry()
                    .register(
                        &operator(),
                        donor_at("contested@example.org", BloodType::APos, 40.0, -74.0),
                    )
                    .await
            }));
        }

        let mut admitted = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(RegistryError::DuplicateEmail { .. }) => refused += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(refused, 7);
        assert_eq!(engine.registry().active_donors().len(), 1);
        assert_eq!(engine.donor_store.record_count(), 1);
        assert_eq!(engine.geo_index.len(), 1);
    }

    // =========================================================================
    // READERS AGAINST WRITERS
    // =========================================================================

    /// A donor bouncing between two cells must show up in every match
    /// result exactly once: the index keeps the donor visible throughout a
    /// move and the ranking stage collapses double observations.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_matching_never_loses_or_doubles_a_relocating_donor() {
        let engine = Arc::new(engine());
        let donor = engine
            .registry()
            .register(
                &operator(),
                donor_at("nomad@example.org", BloodType::ONeg, 40.2, -74.0),
            )
            .await
            .unwrap();

        let writer = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                for i in 0..100 {
                    let lat = if i % 2 == 0 { 40.3 } else { 40.2 };
                    engine
                        .registry()
                        .update_coordinate(&operator(), donor, coord(lat, -74.0))
                        .await
                        .unwrap();
                }
            })
        };

        // Origin sits between the two positions; the radius covers both.
        for _ in 0..100 {
            let hits = engine
                .matching()
                .match_donors(MatchQuery {
                    origin: coord(40.25, -74.0),
                    blood_type: BloodType::ONeg,
                    radius_km: 50.0,
                    max_results: None,
                    timeout: None,
                })
                .unwrap();
            assert_eq!(hits.len(), 1, "donor must appear exactly once");
            assert_eq!(hits[0].donor_id, donor);
        }

        writer.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_all_reach_the_board() {
        let engine = Arc::new(engine());
        engine
            .registry()
            .register(
                &operator(),
                donor_at("steady@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                engine
                    .lifecycle()
                    .submit(
                        &operator(),
                        request_at(BloodType::ONeg, 40.0, -74.0),
                        pdf_document(64),
                    )
                    .await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let receipt = handle.await.unwrap().unwrap();
            assert_eq!(receipt.snapshot.donors.len(), 1);
            ids.push(receipt.request_id);
        }

        let board = engine.lifecycle().list();
        assert_eq!(board.len(), 16);
        for id in ids {
            assert!(engine.lifecycle().get(id).is_some());
        }
        assert_eq!(engine.request_store.record_count(), 16);
    }
}
