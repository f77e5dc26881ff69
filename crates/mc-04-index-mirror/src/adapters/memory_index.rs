//! # In-Memory Index
//!
//! Reference `IndexStore` with an injectable one-shot outage switch used by
//! the partial-commit tests, and an optional "no native sort" mode that
//! exercises the degraded ordering fallback.

use crate::ports::{BatchFilter, IndexStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Batch, CustodyError, Identity, Pointer, UserRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::warn;

struct Row {
    batch: Batch,
    inserted: u64,
}

/// In-memory implementation of `IndexStore`.
pub struct InMemoryIndex {
    rows: RwLock<HashMap<String, Row>>,
    users: RwLock<HashMap<String, UserRecord>>,
    insert_seq: AtomicU64,
    fail_next_upsert: AtomicBool,
    ordered_queries: bool,
}

impl InMemoryIndex {
    /// Index with native creation-time ordering.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            insert_seq: AtomicU64::new(0),
            fail_next_upsert: AtomicBool::new(false),
            ordered_queries: true,
        }
    }

    /// Index without a native sort capability; queries take the documented
    /// unordered-fetch-then-client-sort fallback.
    pub fn without_sort_support() -> Self {
        Self {
            ordered_queries: false,
            ..Self::new()
        }
    }

    /// Make the next upsert fail once, simulating an index outage between
    /// ledger confirmation and the mirror write.
    pub fn fail_next_upsert(&self) {
        self.fail_next_upsert.store(true, Ordering::SeqCst);
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for InMemoryIndex {
    async fn upsert(&self, batch: &Batch) -> Result<(), CustodyError> {
        if self.fail_next_upsert.swap(false, Ordering::SeqCst) {
            return Err(CustodyError::Store("index outage".to_string()));
        }
        let mut rows = self.rows.write();
        let key = batch.pointer.as_str().to_string();
        match rows.get_mut(&key) {
            Some(row) => row.batch = batch.clone(),
            None => {
                let inserted = self.insert_seq.fetch_add(1, Ordering::SeqCst);
                rows.insert(
                    key,
                    Row {
                        batch: batch.clone(),
                        inserted,
                    },
                );
            }
        }
        Ok(())
    }

    async fn get(&self, pointer: &Pointer) -> Result<Batch, CustodyError> {
        self.rows
            .read()
            .get(pointer.as_str())
            .map(|row| row.batch.clone())
            .ok_or_else(|| CustodyError::NotFound(pointer.to_string()))
    }

    async fn get_by_batch_id(&self, batch_id: &str) -> Result<Batch, CustodyError> {
        self.rows
            .read()
            .values()
            .find(|row| row.batch.batch_id == batch_id)
            .map(|row| row.batch.clone())
            .ok_or_else(|| CustodyError::NotFound(batch_id.to_string()))
    }

    async fn query(&self, filter: &BatchFilter) -> Result<Vec<Batch>, CustodyError> {
        let rows = self.rows.read();
        let mut hits: Vec<(u64, Batch)> = rows
            .values()
            .filter(|row| filter.matches(&row.batch))
            .map(|row| (row.inserted, row.batch.clone()))
            .collect();

        if self.ordered_queries {
            hits.sort_unstable_by_key(|(inserted, _)| *inserted);
        } else {
            // Degraded mode: no native sort capability, order client-side.
            warn!("index lacks ordered queries; sorting client-side");
            hits.sort_unstable_by(|(_, a), (_, b)| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.batch_id.cmp(&b.batch_id))
            });
        }
        Ok(hits.into_iter().map(|(_, batch)| batch).collect())
    }

    async fn put_user(&self, user: &UserRecord) -> Result<(), CustodyError> {
        self.users
            .write()
            .insert(user.wallet.normalized(), user.clone());
        Ok(())
    }

    async fn get_user(&self, wallet: &Identity) -> Result<UserRecord, CustodyError> {
        self.users
            .read()
            .get(&wallet.normalized())
            .cloned()
            .ok_or_else(|| CustodyError::NotFound(wallet.to_string()))
    }
}
