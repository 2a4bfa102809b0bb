//! InMemoryRecordStore - BTreeMap-backed record store for tests and single-node use.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::numeric::StoredValue;

use super::{
    compare_sort_values, project, BatchDeleteOutcome, IndexQuery, IndexSpec, Item, RecordKey,
    RecordStore, SortKey, StoreError, LEADERBOARD_INDEX, PARTITION_KEY, SORT_KEY,
};

/// Partition key to the owner's items, kept in sort-key order.
type Partitions = BTreeMap<String, BTreeMap<SortKey, Item>>;

/// In-memory record store.
///
/// Each owner's items live in their own ordered map, so owner queries come
/// back ascending without sorting. Index queries walk every partition.
/// Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<Partitions>>,
    indexes: Vec<IndexSpec>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create an empty store with the leaderboard index defined.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(BTreeMap::new())),
            indexes: vec![LEADERBOARD_INDEX],
        }
    }

    /// Total number of stored items.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(storage.values().map(BTreeMap::len).sum())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn index(&self, name: &str) -> Result<&IndexSpec, StoreError> {
        self.indexes
            .iter()
            .find(|index| index.name == name)
            .ok_or_else(|| StoreError::UnknownIndex(name.to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put(&self, item: Item) -> Result<(), StoreError> {
        let key = RecordKey::from_item(&item)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("put"))?;

        storage
            .entry(key.user_id)
            .or_default()
            .insert(key.timestamp, item);
        Ok(())
    }

    fn query_by_owner(&self, user_id: &str) -> Result<Vec<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("query_by_owner"))?;

        Ok(storage
            .get(user_id)
            .map(|partition| partition.values().cloned().collect())
            .unwrap_or_default())
    }

    fn query_by_owner_projected(
        &self,
        user_id: &str,
        attributes: &[&str],
    ) -> Result<Vec<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("query_by_owner_projected"))?;

        Ok(storage
            .get(user_id)
            .map(|partition| {
                partition
                    .values()
                    .map(|item| project(item, attributes))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn query_by_index(&self, query: IndexQuery<'_>) -> Result<Vec<Item>, StoreError> {
        let index = self.index(query.index)?;
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("query_by_index"))?;

        // Items without a scalar index sort value are not part of the index.
        let mut matches: Vec<&Item> = storage
            .values()
            .flat_map(BTreeMap::values)
            .filter(|item| {
                item.get(index.partition_attribute).and_then(StoredValue::as_text)
                    == Some(query.partition)
            })
            .filter(|item| {
                matches!(
                    item.get(index.sort_attribute),
                    Some(StoredValue::Number(_) | StoredValue::Text(_))
                )
            })
            .collect();

        matches.sort_by(|a, b| {
            let by_sort = compare_attribute(a, b, index.sort_attribute);
            let by_sort = if query.descending {
                by_sort.reverse()
            } else {
                by_sort
            };
            by_sort
                .then_with(|| compare_attribute(a, b, SORT_KEY))
                .then_with(|| compare_attribute(a, b, PARTITION_KEY))
        });

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("scan_all"))?;

        Ok(storage
            .values()
            .flat_map(BTreeMap::values)
            .cloned()
            .collect())
    }

    fn batch_delete(&self, keys: &[RecordKey]) -> Result<BatchDeleteOutcome, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("batch_delete"))?;

        for key in keys {
            let now_empty = match storage.get_mut(&key.user_id) {
                Some(partition) => {
                    partition.remove(&key.timestamp);
                    partition.is_empty()
                }
                None => false,
            };
            if now_empty {
                storage.remove(&key.user_id);
            }
        }

        Ok(BatchDeleteOutcome {
            processed: keys.len(),
            unprocessed: Vec::new(),
        })
    }
}

fn compare_attribute(a: &Item, b: &Item, attribute: &str) -> Ordering {
    match (a.get(attribute), b.get(attribute)) {
        (Some(x), Some(y)) => compare_sort_values(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
