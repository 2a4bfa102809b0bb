//! Shared fixtures: a fault-injecting store and request helpers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use quiz_results::store::{BatchDeleteOutcome, IndexQuery};
use quiz_results::{
    results_service, AdminKey, Config, InMemoryRecordStore, Item, RecordKey, RecordStore,
    Service, StoreError,
};
use serde_json::{json, Value};

pub const ADMIN_SECRET: &str = "test-admin-secret";

/// Which store operations should fail.
#[derive(Default)]
pub struct Faults {
    pub put: AtomicBool,
    pub query_by_owner: AtomicBool,
    pub projection: AtomicBool,
    pub index: AtomicBool,
    pub scan: AtomicBool,
    pub batch_delete: AtomicBool,
}

/// An in-memory store whose operations can be switched to fail.
#[derive(Clone, Default)]
pub struct FaultyStore {
    pub inner: InMemoryRecordStore,
    pub faults: Arc<Faults>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(flag: &AtomicBool, operation: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{operation} refused")));
        }
        Ok(())
    }
}

impl RecordStore for FaultyStore {
    fn put(&self, item: Item) -> Result<(), StoreError> {
        Self::check(&self.faults.put, "put")?;
        self.inner.put(item)
    }

    fn query_by_owner(&self, user_id: &str) -> Result<Vec<Item>, StoreError> {
        Self::check(&self.faults.query_by_owner, "query")?;
        self.inner.query_by_owner(user_id)
    }

    fn query_by_owner_projected(
        &self,
        user_id: &str,
        attributes: &[&str],
    ) -> Result<Vec<Item>, StoreError> {
        Self::check(&self.faults.projection, "projected query")?;
        self.inner.query_by_owner_projected(user_id, attributes)
    }

    fn query_by_index(&self, query: IndexQuery<'_>) -> Result<Vec<Item>, StoreError> {
        Self::check(&self.faults.index, "index query")?;
        self.inner.query_by_index(query)
    }

    fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        Self::check(&self.faults.scan, "scan")?;
        self.inner.scan_all()
    }

    fn batch_delete(&self, keys: &[RecordKey]) -> Result<BatchDeleteOutcome, StoreError> {
        Self::check(&self.faults.batch_delete, "batch delete")?;
        self.inner.batch_delete(keys)
    }
}

pub fn test_config() -> Config {
    Config {
        admin_key: AdminKey::new(ADMIN_SECRET),
        ..Config::default()
    }
}

pub fn in_memory_service() -> Service<InMemoryRecordStore> {
    results_service(InMemoryRecordStore::new(), test_config())
}

pub fn faulty_service() -> (Service<FaultyStore>, FaultyStore) {
    let store = FaultyStore::new();
    (results_service(store.clone(), test_config()), store)
}

/// A result body with every optional field filled in.
pub fn result_body(user_id: &str, timestamp: &str, game_id: &str, score: Value) -> Value {
    json!({
        "userId": user_id,
        "timestamp": timestamp,
        "gameId": game_id,
        "name": format!("player {user_id}"),
        "level": 3,
        "score": score,
        "total": 10,
        "rate": 0.8,
        "settings": { "instrument": "piano" }
    })
}

/// ISO-8601 timestamp `n` seconds into the day, so lexical order is time order.
pub fn timestamp(n: u32) -> String {
    format!(
        "2025-01-01T{:02}:{:02}:{:02}.000Z",
        n / 3600,
        (n / 60) % 60,
        n % 60
    )
}
