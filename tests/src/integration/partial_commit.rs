//! # Partial Commit Tests
//!
//! The two failure asymmetries: ledger failure aborts cleanly and is
//! retryable; index failure after ledger confirmation degrades to
//! `PartiallyCommitted` and is resolved by read-repair, never by a ledger
//! retry.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use mc_04_index_mirror::IndexStore;
    use mc_05_custody_engine::{repair_pass, CommitState};
    use shared_types::{BatchStatus, CustodyError, TransitionType};

    #[tokio::test]
    async fn test_index_outage_degrades_to_partial_commit() {
        let h = harness().await;
        walk_to_pharmacy(&h, "B-1").await;

        // The index goes down between ledger confirmation and the mirror
        // write.
        h.index.fail_next_upsert();
        let outcome = h
            .engine
            .request_transition("B-1", TransitionType::Dispense, &h.pharmacy)
            .await
            .unwrap();

        assert_eq!(outcome.commit, CommitState::PartiallyCommitted);
        assert!(!outcome.is_fully_committed());
        // The transition is effective: the ledger already advanced.
        assert_eq!(outcome.batch.status, BatchStatus::Dispensed);

        // The mirror is stale until repaired.
        let stale = h.index.get_by_batch_id("B-1").await.unwrap();
        assert_eq!(stale.status, BatchStatus::ReceivedByPharmacy);

        // Read-repair rebuilds the record from ledger history.
        let repaired = h.engine.read_repair("B-1").await.unwrap();
        assert_eq!(repaired.status, BatchStatus::Dispensed);
        // Off-chain metadata survives the rebuild.
        assert_eq!(repaired.drug_name, "Amoxicillin 500mg");

        let fresh = h.index.get_by_batch_id("B-1").await.unwrap();
        assert_eq!(fresh.status, BatchStatus::Dispensed);
    }

    #[tokio::test]
    async fn test_read_repair_is_idempotent() {
        let h = harness().await;
        walk_to_pharmacy(&h, "B-1").await;

        let first = h.engine.read_repair("B-1").await.unwrap();
        let second = h.engine.read_repair("B-1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(h.index.get_by_batch_id("B-1").await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_ledger_failure_aborts_without_index_write() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();

        h.ledger.set_fail_submissions(true);
        let result = h
            .engine
            .request_transition("B-1", TransitionType::ShipToDistributor, &h.manufacturer)
            .await;
        assert!(matches!(result, Err(CustodyError::Unconfirmed(_))));

        // No state advanced anywhere: the index still shows Created.
        let view = h.index.get_by_batch_id("B-1").await.unwrap();
        assert_eq!(view.status, BatchStatus::Created);

        // Unconfirmed is safe to retry wholesale once the ledger is back.
        h.ledger.set_fail_submissions(false);
        let retried = h
            .engine
            .request_transition("B-1", TransitionType::ShipToDistributor, &h.manufacturer)
            .await
            .unwrap();
        assert_eq!(retried.batch.status, BatchStatus::InTransitToDistributor);
        assert_eq!(retried.commit, CommitState::Committed);
    }

    #[tokio::test]
    async fn test_repair_pass_reports_failures_per_batch() {
        let h = harness().await;
        h.engine
            .create_batch(new_batch("B-1"), &h.manufacturer)
            .await
            .unwrap();

        let failures = repair_pass(
            h.engine.as_ref(),
            &["B-1".to_string(), "B-missing".to_string()],
        )
        .await;

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "B-missing");
        assert!(matches!(failures[0].1, CustodyError::NotFound(_)));
    }
}
