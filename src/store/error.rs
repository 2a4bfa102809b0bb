use thiserror::Error;

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("item is missing key attribute {0}")]
    MissingKeyAttribute(&'static str),

    #[error("key attribute {attribute} must be text or number, got {found}")]
    InvalidKeyAttribute {
        attribute: &'static str,
        found: &'static str,
    },

    #[error("unknown index: {0}")]
    UnknownIndex(String),

    /// The backing service could not be reached or refused the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
