//! Error types for request handlers.

use serde_json::{json, Value};
use thiserror::Error;

use crate::numeric::NumericError;
use crate::record::RecordError;
use crate::store::StoreError;

/// Generic 500 message used when no more specific context applies.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Error type for request handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required field or parameter is missing. The message is shown to the caller.
    #[error("{0}")]
    Validation(String),

    /// The body is not JSON or does not fit the result schema.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Routes exist for the method but none accepted the request.
    #[error("no route for {0} request")]
    NoRoute(String),

    /// The record store failed. `context` is the caller-facing message.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Wrap store errors with a caller-facing context message.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> HandlerError {
        move |source| HandlerError::Store { context, source }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        HandlerError::Validation(message.into())
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::Validation(_) => 400,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::UnsupportedMethod(_) => 400,
            HandlerError::NoRoute(_) => 404,
            HandlerError::Store { .. } => 500,
            HandlerError::Internal(_) => 500,
        }
    }

    /// JSON body sent to the caller. Server-side failures echo the underlying error text.
    pub fn body(&self) -> Value {
        match self {
            HandlerError::Validation(message) => json!({ "message": message }),
            HandlerError::DecodeFailed(reason) => {
                json!({ "message": "Malformed request body", "error": reason })
            }
            HandlerError::UnsupportedMethod(_) => json!({ "message": "Unsupported method" }),
            HandlerError::NoRoute(_) => json!({ "message": "Not found" }),
            HandlerError::Store { context, source } => {
                json!({ "message": context, "error": source.to_string() })
            }
            HandlerError::Internal(reason) => {
                json!({ "message": INTERNAL_SERVER_ERROR, "error": reason })
            }
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(source: StoreError) -> Self {
        HandlerError::Store {
            context: INTERNAL_SERVER_ERROR,
            source,
        }
    }
}

impl From<RecordError> for HandlerError {
    fn from(err: RecordError) -> Self {
        HandlerError::Validation(err.to_string())
    }
}

impl From<NumericError> for HandlerError {
    fn from(err: NumericError) -> Self {
        HandlerError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}
