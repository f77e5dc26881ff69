//! # Custody Flow Tests
//!
//! Batch creation, role gates along the path, and the full lifecycle walk.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use mc_04_index_mirror::IndexStore;
    use mc_05_custody_engine::CommitState;
    use shared_types::{BatchStatus, CustodyError, CustodyEventType, Pointer, TransitionType};

    #[tokio::test]
    async fn test_manufacturer_creates_batch() {
        let h = harness().await;
        let created = h
            .engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();

        assert_eq!(created.batch.status, BatchStatus::Created);
        assert_eq!(created.batch.current_owner, h.manufacturer);
        assert_eq!(created.commit, CommitState::Committed);

        let history = h.engine.get_history("B-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, CustodyEventType::Created);
        assert_eq!(history[0].actor, h.manufacturer);
    }

    #[tokio::test]
    async fn test_duplicate_batch_id_rejected() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();
        let result = h
            .engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await;
        assert!(matches!(result, Err(CustodyError::DuplicateBatch(_))));
    }

    #[tokio::test]
    async fn test_receive_without_distributor_role_is_unauthorized() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();
        h.engine
            .request_transition("B-1", TransitionType::ShipToDistributor, &h.manufacturer)
            .await
            .unwrap();

        // The pharmacy identity holds no distributor role.
        let result = h
            .engine
            .request_transition("B-1", TransitionType::ReceiveByDistributor, &h.pharmacy)
            .await;
        assert!(matches!(result, Err(CustodyError::Unauthorized { .. })));

        // Status unchanged on both stores.
        let view = h.index.get_by_batch_id("B-1").await.unwrap();
        assert_eq!(view.status, BatchStatus::InTransitToDistributor);
        let history = h.engine.get_history("B-1").await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_distributor_receives_batch() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();
        h.engine
            .request_transition("B-1", TransitionType::ShipToDistributor, &h.manufacturer)
            .await
            .unwrap();

        let outcome = h
            .engine
            .request_transition("B-1", TransitionType::ReceiveByDistributor, &h.distributor)
            .await
            .unwrap();

        assert_eq!(outcome.batch.status, BatchStatus::ReceivedByDistributor);
        assert_eq!(outcome.batch.current_owner, h.distributor);

        let history = h.engine.get_history("B-1").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].event_type, CustodyEventType::Created);
        assert_eq!(history[1].event_type, CustodyEventType::TransferInitiated);
        assert_eq!(history[2].event_type, CustodyEventType::Received);
        assert_eq!(history[2].actor, h.distributor);
    }

    #[tokio::test]
    async fn test_handoff_by_non_owner_is_unauthorized() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();

        // A distributor cannot initiate the manufacturer's handoff.
        let result = h
            .engine
            .request_transition("B-1", TransitionType::ShipToDistributor, &h.distributor)
            .await;
        assert!(matches!(
            result,
            Err(CustodyError::Unauthorized { required, .. }) if required == "current ownership"
        ));
    }

    #[tokio::test]
    async fn test_full_lifecycle_walk() {
        let h = harness().await;
        walk_to_pharmacy(&h, "B-9").await;

        let view = h.index.get_by_batch_id("B-9").await.unwrap();
        assert_eq!(view.status, BatchStatus::ReceivedByPharmacy);
        assert_eq!(view.current_owner, h.pharmacy);

        let dispensed = h
            .engine
            .request_transition("B-9", TransitionType::Dispense, &h.pharmacy)
            .await
            .unwrap();
        assert_eq!(dispensed.batch.status, BatchStatus::Dispensed);
        // Ownership stays with the dispensing pharmacy for the audit trail.
        assert_eq!(dispensed.batch.current_owner, h.pharmacy);

        let history = h.engine.get_history("B-9").await.unwrap();
        let kinds: Vec<_> = history.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                CustodyEventType::Created,
                CustodyEventType::TransferInitiated,
                CustodyEventType::Received,
                CustodyEventType::TransferInitiated,
                CustodyEventType::Received,
                CustodyEventType::Dispensed,
            ]
        );

        // Terminal: nothing further is legal.
        let result = h
            .engine
            .request_transition("B-9", TransitionType::Dispense, &h.pharmacy)
            .await;
        assert!(matches!(
            result,
            Err(CustodyError::IllegalTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_skipping_a_step_is_illegal() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();

        for transition in [
            TransitionType::ReceiveByDistributor,
            TransitionType::ShipToPharmacy,
            TransitionType::ReceiveByPharmacy,
            TransitionType::Dispense,
        ] {
            let result = h
                .engine
                .request_transition("B-1", transition, &h.pharmacy)
                .await;
            assert!(
                matches!(result, Err(CustodyError::IllegalTransition { .. })),
                "{transition} should be illegal from Created"
            );
        }
    }

    #[tokio::test]
    async fn test_attach_prescription_at_pharmacy() {
        let h = harness().await;
        walk_to_pharmacy(&h, "B-1").await;

        let prescription = Pointer::new("rx-2024-0099");
        let outcome = h
            .engine
            .attach_prescription("B-1", prescription.clone(), &h.pharmacy)
            .await
            .unwrap();
        assert_eq!(outcome.batch.prescription_pointer, Some(prescription.clone()));

        // Anchored on the ledger, mirrored in the index.
        assert_eq!(h.ledger.prescription_pointer("B-1"), Some(prescription));

        // A distributor cannot anchor prescriptions.
        let result = h
            .engine
            .attach_prescription("B-1", Pointer::new("rx-x"), &h.distributor)
            .await;
        assert!(matches!(result, Err(CustodyError::Unauthorized { .. })));
    }
}
