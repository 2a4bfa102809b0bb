//! Record Store - the storage abstraction behind every query mode.
//!
//! Items are attribute maps keyed by `(userId, timestamp)`. A secondary
//! index, [`LEADERBOARD_INDEX`], views the same items by `(gameId, score)`.
//! All operations are synchronous; remote backends block on their calls.
//!
//! ## Example
//!
//! ```
//! use quiz_results::store::{InMemoryRecordStore, Item, RecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! let mut item = Item::new();
//! item.insert("userId".into(), "u1".into());
//! item.insert("timestamp".into(), "2025-01-01T00:00:00Z".into());
//! store.put(item).unwrap();
//!
//! assert_eq!(store.query_by_owner("u1").unwrap().len(), 1);
//! ```

mod error;
mod in_memory;
mod key;

use std::collections::BTreeMap;

use crate::numeric::StoredValue;
use crate::record::{GAME_ID, SCORE, TIMESTAMP, USER_ID};

pub use error::StoreError;
pub use in_memory::InMemoryRecordStore;
pub use key::{compare_sort_values, RecordKey, SortKey};

/// One stored record: attribute name to stored value.
pub type Item = BTreeMap<String, StoredValue>;

/// Partition and sort attributes of the primary key.
pub const PARTITION_KEY: &str = USER_ID;
pub const SORT_KEY: &str = TIMESTAMP;

/// A secondary index definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub partition_attribute: &'static str,
    pub sort_attribute: &'static str,
}

/// Per-game view ordered by score.
pub const LEADERBOARD_INDEX: IndexSpec = IndexSpec {
    name: "LeaderboardIndex",
    partition_attribute: GAME_ID,
    sort_attribute: SCORE,
};

/// A query against a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexQuery<'a> {
    pub index: &'a str,
    pub partition: &'a str,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl<'a> IndexQuery<'a> {
    pub fn new(index: &'a str, partition: &'a str) -> Self {
        Self {
            index,
            partition,
            descending: false,
            limit: None,
        }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Result of a best-effort batch delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDeleteOutcome {
    /// Keys the store accepted, including keys that were already absent.
    pub processed: usize,
    /// Keys the store did not get to; callers may retry them later.
    pub unprocessed: Vec<RecordKey>,
}

/// Storage for result records.
///
/// Implementations must keep `put` an upsert on `(userId, timestamp)` and
/// return owner queries in ascending sort-key order.
pub trait RecordStore: Send + Sync {
    /// Insert or replace the item with the same primary key.
    fn put(&self, item: Item) -> Result<(), StoreError>;

    /// All items of one owner, ascending by timestamp.
    fn query_by_owner(&self, user_id: &str) -> Result<Vec<Item>, StoreError>;

    /// Like [`query_by_owner`](Self::query_by_owner), keeping only the named attributes.
    fn query_by_owner_projected(
        &self,
        user_id: &str,
        attributes: &[&str],
    ) -> Result<Vec<Item>, StoreError>;

    /// Items of one index partition ordered by the index sort attribute.
    fn query_by_index(&self, query: IndexQuery<'_>) -> Result<Vec<Item>, StoreError>;

    /// Every item in the store.
    fn scan_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Delete the given keys. Missing keys count as processed.
    fn batch_delete(&self, keys: &[RecordKey]) -> Result<BatchDeleteOutcome, StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn put(&self, item: Item) -> Result<(), StoreError> {
        (**self).put(item)
    }

    fn query_by_owner(&self, user_id: &str) -> Result<Vec<Item>, StoreError> {
        (**self).query_by_owner(user_id)
    }

    fn query_by_owner_projected(
        &self,
        user_id: &str,
        attributes: &[&str],
    ) -> Result<Vec<Item>, StoreError> {
        (**self).query_by_owner_projected(user_id, attributes)
    }

    fn query_by_index(&self, query: IndexQuery<'_>) -> Result<Vec<Item>, StoreError> {
        (**self).query_by_index(query)
    }

    fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        (**self).scan_all()
    }

    fn batch_delete(&self, keys: &[RecordKey]) -> Result<BatchDeleteOutcome, StoreError> {
        (**self).batch_delete(keys)
    }
}

/// Keep only the named attributes of an item.
pub fn project(item: &Item, attributes: &[&str]) -> Item {
    attributes
        .iter()
        .filter_map(|name| item.get(*name).map(|v| (name.to_string(), v.clone())))
        .collect()
}
