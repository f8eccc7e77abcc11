//! # Integration Test Flows
//!
//! Tests that hl-01-geo-index, hl-02-matching, hl-03-donor-registry and
//! hl-04-request-lifecycle work together correctly through the engine
//! container.
//!
//! ## Flows Tested:
//!
//! 1. **Registry (03) → Geo Index (01)**: registrations, moves and
//!    deactivations project into the search surface write-through
//! 2. **Lifecycle (04) → Matching (02) → Registry (03)**: submissions
//!    freeze a ranked snapshot of the live donor population
//! 3. **Durable stores**: write failures roll back cleanly and restart
//!    replay rebuilds both the projection and the request board

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use hl_01_geo_index::GeoIndex;
    use hl_02_matching::{
        CompatibilityMode, MatchError, MatchQuery, MatchingApi, MatchingService, NearbyQuery,
    };
    use hl_03_donor_registry::{
        DonorStore, ProfileUpdate, RegistryApi, RegistryError, RegistryService,
        SystemClock as RegistryClock,
    };
    use hl_04_request_lifecycle::{
        BlobStore, DocumentPolicy, LifecycleApi, LifecycleError, LifecycleService, ProofDocument,
        RequestStatus, RequestStore, SystemClock as LifecycleClock,
    };
    use service_runtime::adapters::{
        DonorDirectoryAdapter, DonorLocatorAdapter, GeoProjectionAdapter, MatchProviderAdapter,
    };
    use service_runtime::container::ServiceConfig;
    use shared_types::{BloodType, DonorStatus};

    use crate::fixtures::{
        coord, donor_at, engine, engine_with, operator, pdf_document, request_at,
    };

    // =========================================================================
    // SUBMISSION CHOREOGRAPHY
    // =========================================================================

    /// The flagship flow: two donors register, a request arrives, and the
    /// receipt carries both ranked by distance with full precision.
    #[tokio::test]
    async fn test_submission_freezes_ranked_matches() {
        let engine = engine();
        let near = engine
            .registry()
            .register(
                &operator(),
                donor_at("near@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();
        let far = engine
            .registry()
            .register(
                &operator(),
                donor_at("far@example.org", BloodType::ONeg, 40.01, -74.0),
            )
            .await
            .unwrap();

        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(512),
            )
            .await
            .unwrap();

        let rows = &receipt.snapshot.donors;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].donor_id, near);
        assert!(rows[0].distance_km.abs() < 1e-9);
        assert_eq!(rows[1].donor_id, far);
        // 0.01 degrees of latitude on a 6371 km sphere, stored unrounded.
        assert!((rows[1].distance_km - 1.111_949_266_445_587_3).abs() < 1e-9);
        assert_eq!(rows[1].rounded_distance_km(), 1.11);

        // The board holds the same snapshot and the request starts Pending.
        let stored = engine
            .lifecycle()
            .get(receipt.request_id)
            .expect("request on the board");
        assert_eq!(stored.status, RequestStatus::Pending);
        assert_eq!(stored.snapshot.donors, receipt.snapshot.donors);

        // The proof document resolves through the stored handle.
        let bytes = engine.blob_store.get(stored.document).await.unwrap();
        assert_eq!(bytes.len(), 512);
        assert_eq!(
            engine.blob_store.extension_of(stored.document).as_deref(),
            Some("pdf")
        );
    }

    /// Zero matches is a valid outcome: the request still lands on the
    /// board so coordinators can act on it manually.
    #[tokio::test]
    async fn test_no_compatible_donor_is_still_a_valid_submission() {
        let engine = engine();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("only@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        // Exact policy: an A+ request does not see the O- donor.
        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::APos, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();

        assert!(receipt.snapshot.donors.is_empty());
        let stored = engine.lifecycle().get(receipt.request_id).unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    /// The same donor population yields different match sets under the two
    /// compatibility policies.
    #[tokio::test]
    async fn test_medical_policy_widens_the_donor_pool() {
        let mut config = ServiceConfig::default();
        config.compatibility = CompatibilityMode::Medical;
        let medical = engine_with(config);

        let universal = medical
            .registry()
            .register(
                &operator(),
                donor_at("universal@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        // AB+ accepts every type under medical compatibility.
        let receipt = medical
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::AbPos, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        assert_eq!(receipt.snapshot.donors.len(), 1);
        assert_eq!(receipt.snapshot.donors[0].donor_id, universal);

        // An exact-mode engine keeps refusing the same pairing.
        let strict = engine();
        strict
            .registry()
            .register(
                &operator(),
                donor_at("universal@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();
        let strict_receipt = strict
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::AbPos, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        assert!(strict_receipt.snapshot.donors.is_empty());
    }

    /// The board presents requests newest-first.
    #[tokio::test]
    async fn test_board_lists_newest_requests_first() {
        let engine = engine();

        let first = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::APos, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        // Force distinct created_at stamps.
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::BNeg, 40.1, -74.1),
                pdf_document(64),
            )
            .await
            .unwrap();

        let board = engine.lifecycle().list();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].id, second.request_id);
        assert_eq!(board[1].id, first.request_id);
    }

    // =========================================================================
    // QUERY GUARDRAILS
    // =========================================================================

    /// 500 km is the inclusive search ceiling; anything past it is refused
    /// before the index is touched.
    #[test]
    fn test_radius_cap_is_inclusive_at_the_boundary() {
        let engine = engine();

        let at_cap = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 500.0,
            max_results: None,
            timeout: None,
        };
        assert!(engine.matching().match_donors(at_cap).unwrap().is_empty());

        let beyond = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 500.1,
            max_results: None,
            timeout: None,
        };
        match engine.matching().match_donors(beyond) {
            Err(MatchError::InvalidInput { field, .. }) => assert_eq!(field, "radius_km"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    /// An exhausted time budget is reported as an error, never passed off
    /// as an empty (but plausible-looking) result.
    #[tokio::test]
    async fn test_exhausted_time_budget_is_an_error_not_an_empty_list() {
        let engine = engine();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("close@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        let hurried = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 50.0,
            max_results: None,
            timeout: Some(Duration::ZERO),
        };
        assert!(matches!(
            engine.matching().match_donors(hurried),
            Err(MatchError::Timeout)
        ));

        let unhurried = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 50.0,
            max_results: None,
            timeout: None,
        };
        assert_eq!(engine.matching().match_donors(unhurried).unwrap().len(), 1);
    }

    /// The public map surface ignores blood type entirely.
    #[tokio::test]
    async fn test_public_map_lists_donors_of_every_type() {
        let engine = engine();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("rare@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("common@example.org", BloodType::AbPos, 40.01, -74.0),
            )
            .await
            .unwrap();

        let map = engine
            .matching()
            .nearby_donors(NearbyQuery {
                origin: coord(40.0, -74.0),
                radius_km: None,
                max_results: None,
                timeout: None,
            })
            .unwrap();

        assert_eq!(map.len(), 2);
        assert!(map[0].distance_km <= map[1].distance_km);
        let types: Vec<BloodType> = map.iter().map(|d| d.blood_type).collect();
        assert!(types.contains(&BloodType::ONeg));
        assert!(types.contains(&BloodType::AbPos));
    }

    // =========================================================================
    // REGISTRY WRITE-THROUGH
    // =========================================================================

    /// Email uniqueness holds across letter case, and the loser leaves no
    /// second record behind.
    #[tokio::test]
    async fn test_duplicate_email_is_rejected_case_insensitively() {
        let engine = engine();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("Alex@Example.org", BloodType::APos, 40.0, -74.0),
            )
            .await
            .unwrap();

        let err = engine
            .registry()
            .register(
                &operator(),
                donor_at("alex@example.org", BloodType::OPos, 41.0, -75.0),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateEmail { .. }));
        assert_eq!(engine.registry().active_donors().len(), 1);
        assert_eq!(engine.geo_index.len(), 1);
    }

    /// A blood type correction moves the donor between match pools in the
    /// same call that edits the record.
    #[tokio::test]
    async fn test_blood_type_correction_redirects_matching() {
        let engine = engine();
        let donor = engine
            .registry()
            .register(
                &operator(),
                donor_at("typo@example.org", BloodType::OPos, 40.0, -74.0),
            )
            .await
            .unwrap();

        let for_oneg = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 10.0,
            max_results: None,
            timeout: None,
        };
        assert!(engine
            .matching()
            .match_donors(for_oneg.clone())
            .unwrap()
            .is_empty());

        engine
            .registry()
            .update_profile(
                &operator(),
                donor,
                ProfileUpdate {
                    blood_type: Some(BloodType::ONeg),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        let hits = engine.matching().match_donors(for_oneg).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].blood_type, BloodType::ONeg);

        let for_opos = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::OPos,
            radius_km: 10.0,
            max_results: None,
            timeout: None,
        };
        assert!(engine.matching().match_donors(for_opos).unwrap().is_empty());
    }

    // =========================================================================
    // SNAPSHOT IMMUTABILITY
    // =========================================================================

    /// Stored snapshots never chase donors who move after submission; new
    /// submissions see the new position.
    #[tokio::test]
    async fn test_snapshots_survive_donor_relocation() {
        let engine = engine();
        let donor = engine
            .registry()
            .register(
                &operator(),
                donor_at("mobile@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        assert_eq!(receipt.snapshot.donors.len(), 1);

        // ~111 km north, outside the 50 km default search radius.
        engine
            .registry()
            .update_coordinate(&operator(), donor, coord(41.0, -74.0))
            .await
            .unwrap();

        let stored = engine.lifecycle().get(receipt.request_id).unwrap();
        assert_eq!(stored.snapshot.donors.len(), 1);
        assert!(stored.snapshot.donors[0].distance_km.abs() < 1e-9);

        let fresh = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        assert!(fresh.snapshot.donors.is_empty());
    }

    /// Deactivation removes a donor from every future search but leaves
    /// frozen snapshot rows fully readable.
    #[tokio::test]
    async fn test_snapshots_keep_departed_donors_readable() {
        let engine = engine();
        let donor = engine
            .registry()
            .register(
                &operator(),
                donor_at("sleeper@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();
        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();

        engine
            .registry()
            .deactivate(&operator(), donor)
            .await
            .unwrap();

        // Gone from fresh searches.
        let q = MatchQuery {
            origin: coord(40.0, -74.0),
            blood_type: BloodType::ONeg,
            radius_km: 50.0,
            max_results: None,
            timeout: None,
        };
        assert!(engine.matching().match_donors(q).unwrap().is_empty());

        // Still present, with contact details, in the frozen row.
        let stored = engine.lifecycle().get(receipt.request_id).unwrap();
        let row = &stored.snapshot.donors[0];
        assert_eq!(row.donor_id, donor);
        assert_eq!(row.contact.email, "sleeper@example.org");
        assert!(!row.name.is_empty());

        // The registry record itself is retained, not erased.
        let record = engine.registry().get(donor).expect("record retained");
        assert_eq!(record.status, DonorStatus::Deactivated);
    }

    // =========================================================================
    // DURABILITY & REPLAY
    // =========================================================================

    /// Refused documents write nothing: no blob, no record, no board entry.
    #[tokio::test]
    async fn test_rejected_documents_leave_no_trace() {
        let mut config = ServiceConfig::default();
        config.documents = DocumentPolicy::for_testing();
        let engine = engine_with(config);
        let cap = engine.config.documents.max_bytes;

        let exe = ProofDocument {
            filename: "proof.exe".to_string(),
            bytes: vec![0u8; 128],
        };
        let err = engine
            .lifecycle()
            .submit(&operator(), request_at(BloodType::APos, 40.0, -74.0), exe)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Validation {
                field: "document",
                ..
            }
        ));

        let err = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::APos, 40.0, -74.0),
                pdf_document(cap + 1),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Validation {
                field: "document",
                ..
            }
        ));

        assert_eq!(engine.blob_store.blob_count(), 0);
        assert_eq!(engine.request_store.record_count(), 0);
        assert!(engine.lifecycle().list().is_empty());

        // Exactly at the cap is accepted.
        engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::APos, 40.0, -74.0),
                pdf_document(cap),
            )
            .await
            .unwrap();
        assert_eq!(engine.blob_store.blob_count(), 1);
        assert_eq!(engine.request_store.record_count(), 1);
    }

    /// A request-store failure aborts the submission cleanly and the same
    /// submission succeeds on retry.
    #[tokio::test]
    async fn test_request_store_failure_rolls_back_the_submission() {
        let engine = engine();
        engine
            .registry()
            .register(
                &operator(),
                donor_at("helper@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();

        engine.request_store.fail_writes(true);
        let err = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Storage(_)));

        assert!(engine.lifecycle().list().is_empty());
        assert_eq!(engine.request_store.record_count(), 0);

        engine.request_store.fail_writes(false);
        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(64),
            )
            .await
            .unwrap();
        assert_eq!(receipt.snapshot.donors.len(), 1);
        assert_eq!(engine.lifecycle().list().len(), 1);
        assert_eq!(engine.request_store.record_count(), 1);
        // The blob written before the failed record put is orphaned, not
        // rolled back; the retry wrote its own.
        assert_eq!(engine.blob_store.blob_count(), 2);
    }

    /// A donor-store failure rolls the registration back completely; the
    /// email is not burned.
    #[tokio::test]
    async fn test_donor_store_failure_leaves_the_email_unclaimed() {
        let engine = engine();
        engine.donor_store.fail_writes(true);

        let err = engine
            .registry()
            .register(
                &operator(),
                donor_at("retry@example.org", BloodType::BPos, 40.0, -74.0),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Storage(_)));
        assert!(engine.registry().active_donors().is_empty());
        assert!(engine.geo_index.is_empty());

        engine.donor_store.fail_writes(false);
        engine
            .registry()
            .register(
                &operator(),
                donor_at("retry@example.org", BloodType::BPos, 40.0, -74.0),
            )
            .await
            .unwrap();
        assert_eq!(engine.geo_index.len(), 1);
    }

    /// Fresh subsystems over the same stores rebuild the projection (active
    /// donors only) and the board, with snapshots and documents intact.
    #[tokio::test]
    async fn test_restart_replays_donors_and_requests_from_the_stores() {
        let engine = engine();
        let keep = engine
            .registry()
            .register(
                &operator(),
                donor_at("keep@example.org", BloodType::ONeg, 40.0, -74.0),
            )
            .await
            .unwrap();
        let gone = engine
            .registry()
            .register(
                &operator(),
                donor_at("gone@example.org", BloodType::APos, 40.2, -74.2),
            )
            .await
            .unwrap();
        engine.registry().deactivate(&operator(), gone).await.unwrap();
        let receipt = engine
            .lifecycle()
            .submit(
                &operator(),
                request_at(BloodType::ONeg, 40.0, -74.0),
                pdf_document(256),
            )
            .await
            .unwrap();

        // "Restart": fresh subsystems wired over the surviving stores.
        let config = ServiceConfig::default();
        let index = Arc::new(GeoIndex::new(config.index).unwrap());
        let registry = Arc::new(RegistryService::new(
            Arc::clone(&engine.donor_store) as Arc<dyn DonorStore>,
            Arc::new(GeoProjectionAdapter::new(Arc::clone(&index))),
            Arc::new(RegistryClock),
            config.registry,
        ));

        let projected = registry.rebuild_projection().await.unwrap();
        assert_eq!(projected, 1);
        assert_eq!(index.len(), 1);
        assert!(index.contains(keep));

        // Both records survive; only the active donor is searchable.
        let record = registry.get(gone).expect("deactivated record replayed");
        assert_eq!(record.status, DonorStatus::Deactivated);
        let err = registry
            .register(
                &operator(),
                donor_at("gone@example.org", BloodType::APos, 40.2, -74.2),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateEmail { .. }));

        let matching = Arc::new(MatchingService::new(
            Arc::new(DonorLocatorAdapter::new(Arc::clone(&index))),
            Arc::new(DonorDirectoryAdapter::new(Arc::clone(&registry))),
            config.compatibility.policy(),
            config.matching,
        ));
        let lifecycle = LifecycleService::new(
            Arc::clone(&engine.blob_store) as Arc<dyn BlobStore>,
            Arc::clone(&engine.request_store) as Arc<dyn RequestStore>,
            Arc::new(MatchProviderAdapter::new(matching)),
            Arc::new(LifecycleClock),
            config.documents,
        );

        let replayed = lifecycle.rebuild_board().await.unwrap();
        assert_eq!(replayed, 1);

        let restored = lifecycle.get(receipt.request_id).expect("request replayed");
        assert_eq!(restored.snapshot.donors.len(), 1);
        assert!(restored.snapshot.donors[0].distance_km.abs() < 1e-9);
        assert_eq!(
            engine.blob_store.get(restored.document).await.unwrap().len(),
            256
        );
    }
}
