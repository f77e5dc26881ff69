//! Shared fixtures: a fully wired engine with one identity per role.

use mc_01_identity_codec::ChainProfile;
use mc_03_ledger::{InMemoryLedger, LedgerClient};
use mc_04_index_mirror::InMemoryIndex;
use mc_05_custody_engine::{CustodyEngine, NewBatch};
use shared_types::{Identity, Role};
use std::sync::Arc;

pub type TestEngine = CustodyEngine<InMemoryLedger, InMemoryIndex, InMemoryLedger>;

pub struct Harness {
    pub ledger: Arc<InMemoryLedger>,
    pub index: Arc<InMemoryIndex>,
    pub engine: Arc<TestEngine>,
    pub admin: Identity,
    pub manufacturer: Identity,
    pub distributor: Identity,
    pub second_distributor: Identity,
    pub pharmacy: Identity,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Engine over fresh in-memory stores, with every role pre-granted.
pub async fn harness() -> Harness {
    harness_with_index(InMemoryIndex::new()).await
}

/// Same harness over a caller-supplied index adapter.
pub async fn harness_with_index(index: InMemoryIndex) -> Harness {
    init_tracing();
    let admin = Identity::new("0xAdmin");
    let ledger = Arc::new(InMemoryLedger::new(admin.clone()));
    let index = Arc::new(index);

    let manufacturer = Identity::new("0xManu01");
    let distributor = Identity::new("0xDist01");
    let second_distributor = Identity::new("0xDist02");
    let pharmacy = Identity::new("0xPharm01");

    for (role, identity) in [
        (Role::Manufacturer, &manufacturer),
        (Role::Distributor, &distributor),
        (Role::Distributor, &second_distributor),
        (Role::Pharmacy, &pharmacy),
    ] {
        LedgerClient::grant_role(ledger.as_ref(), role, identity, &admin)
            .await
            .expect("role bootstrap");
    }

    let engine = Arc::new(CustodyEngine::new(
        ledger.clone(),
        index.clone(),
        ledger.clone(),
        ChainProfile::new("sepolia", 11_155_111, "0x5FbDB2315678afecb367f032d93F642f64180aa3"),
    ));

    Harness {
        ledger,
        index,
        engine,
        admin,
        manufacturer,
        distributor,
        second_distributor,
        pharmacy,
    }
}

pub fn new_batch(batch_id: &str) -> NewBatch {
    NewBatch {
        batch_id: batch_id.to_string(),
        drug_name: "Amoxicillin 500mg".to_string(),
        expiry: "2027-06-30".to_string(),
    }
}

/// Walk a freshly created batch to ReceivedByPharmacy.
pub async fn walk_to_pharmacy(h: &Harness, batch_id: &str) {
    use shared_types::TransitionType::*;

    h.engine
        .create_batch(new_batch(batch_id), &h.manufacturer)
        .await
        .expect("create");
    for (transition, actor) in [
        (ShipToDistributor, &h.manufacturer),
        (ReceiveByDistributor, &h.distributor),
        (ShipToPharmacy, &h.distributor),
        (ReceiveByPharmacy, &h.pharmacy),
    ] {
        h.engine
            .request_transition(batch_id, transition, actor)
            .await
            .expect("lifecycle step");
    }
}
