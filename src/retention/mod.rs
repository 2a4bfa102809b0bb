//! Retention - caps the number of results kept per user.
//!
//! After every successful write the owner's timestamps are read (projected,
//! so only the sort key crosses the wire) and the oldest excess is deleted in
//! batches. Cleanup is advisory: a failure becomes a
//! [`RetentionOutcome::Deferred`] that is logged, and the next write for the
//! same owner tries again.

use tracing::{debug, warn};

use crate::store::{RecordKey, RecordStore, StoreError, SORT_KEY};

/// Default number of results kept per user.
pub const DEFAULT_RETENTION_LIMIT: usize = 100;

/// Maximum keys sent in one batch delete call.
pub const BATCH_DELETE_CHUNK: usize = 25;

/// What a retention pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionOutcome {
    /// The owner holds no more than the limit; nothing was deleted.
    WithinLimit { retained: usize },
    /// The oldest excess was deleted. `unprocessed` keys were left for a later pass.
    Trimmed { deleted: usize, unprocessed: usize },
    /// The pass failed; the write it followed still stands.
    Deferred { reason: String },
}

impl RetentionOutcome {
    pub fn is_deferred(&self) -> bool {
        matches!(self, RetentionOutcome::Deferred { .. })
    }
}

/// Per-owner record cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    limit: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_LIMIT)
    }
}

impl RetentionPolicy {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Trim the owner's records down to the limit, oldest first.
    ///
    /// Never fails: store errors are logged and reported as `Deferred`.
    pub fn enforce<S: RecordStore + ?Sized>(&self, store: &S, user_id: &str) -> RetentionOutcome {
        match self.try_enforce(store, user_id) {
            Ok(outcome) => {
                if let RetentionOutcome::Trimmed {
                    deleted,
                    unprocessed,
                } = outcome
                {
                    if unprocessed > 0 {
                        warn!(user_id, deleted, unprocessed, "retention left keys unprocessed");
                    } else {
                        debug!(user_id, deleted, "retention trimmed oldest results");
                    }
                }
                outcome
            }
            Err(err) => {
                warn!(user_id, error = %err, "retention deferred");
                RetentionOutcome::Deferred {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_enforce<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
    ) -> Result<RetentionOutcome, StoreError> {
        let timestamps = store.query_by_owner_projected(user_id, &[SORT_KEY])?;
        if timestamps.len() <= self.limit {
            return Ok(RetentionOutcome::WithinLimit {
                retained: timestamps.len(),
            });
        }

        let excess = timestamps.len() - self.limit;
        let keys = timestamps[..excess]
            .iter()
            .map(|item| RecordKey::for_owner(user_id, item))
            .collect::<Result<Vec<_>, _>>()?;

        let mut deleted = 0;
        let mut unprocessed = 0;
        for chunk in keys.chunks(BATCH_DELETE_CHUNK) {
            let outcome = store.batch_delete(chunk)?;
            deleted += outcome.processed;
            unprocessed += outcome.unprocessed.len();
        }

        Ok(RetentionOutcome::Trimmed {
            deleted,
            unprocessed,
        })
    }
}
