use std::cmp::Ordering;

use crate::numeric::StoredValue;

use super::{Item, StoreError, PARTITION_KEY, SORT_KEY};

/// Primary key of a stored result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub user_id: String,
    pub timestamp: SortKey,
}

impl RecordKey {
    pub fn new(user_id: impl Into<String>, timestamp: impl Into<StoredValue>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: SortKey(timestamp.into()),
        }
    }

    /// Extract the primary key from a full item.
    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let user_id = match item.get(PARTITION_KEY) {
            Some(StoredValue::Text(id)) => id.clone(),
            Some(other) => {
                return Err(StoreError::InvalidKeyAttribute {
                    attribute: PARTITION_KEY,
                    found: other.type_name(),
                })
            }
            None => return Err(StoreError::MissingKeyAttribute(PARTITION_KEY)),
        };
        Self::for_owner(&user_id, item)
    }

    /// Build a key from an owner and an item that carries at least the sort key,
    /// such as a timestamp-only projection.
    pub fn for_owner(user_id: &str, item: &Item) -> Result<Self, StoreError> {
        let timestamp = item
            .get(SORT_KEY)
            .ok_or(StoreError::MissingKeyAttribute(SORT_KEY))?;
        Ok(Self {
            user_id: user_id.to_string(),
            timestamp: SortKey::try_from(timestamp.clone())?,
        })
    }
}

/// A timestamp value usable as a sort key.
///
/// Numbers order numerically, text lexicographically, and every number sorts
/// before every text value.
#[derive(Debug, Clone)]
pub struct SortKey(StoredValue);

impl TryFrom<StoredValue> for SortKey {
    type Error = StoreError;

    fn try_from(value: StoredValue) -> Result<Self, Self::Error> {
        match value {
            StoredValue::Number(_) | StoredValue::Text(_) => Ok(SortKey(value)),
            other => Err(StoreError::InvalidKeyAttribute {
                attribute: SORT_KEY,
                found: other.type_name(),
            }),
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_sort_values(&self.0, &other.0)
    }
}

/// Total order over scalar stored values used for key and index sorting.
pub fn compare_sort_values(left: &StoredValue, right: &StoredValue) -> Ordering {
    match (left, right) {
        (StoredValue::Number(a), StoredValue::Number(b)) => a.cmp(b),
        (StoredValue::Text(a), StoredValue::Text(b)) => a.cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}

fn rank(value: &StoredValue) -> u8 {
    match value {
        StoredValue::Number(_) => 0,
        StoredValue::Text(_) => 1,
        _ => 2,
    }
}
