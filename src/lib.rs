//! quiz_results: persistence and queries for quiz game results.
//!
//! One endpoint stores a result per quiz attempt and answers three kinds of
//! reads: a user's history, a game's leaderboard, and an admin dump of every
//! record. Records live in a [`RecordStore`]; numbers cross the store
//! boundary through the [`numeric`] normalizer, and each user keeps at most
//! [`retention::DEFAULT_RETENTION_LIMIT`] results.
//!
//! ## Quick Start
//!
//! ```
//! use quiz_results::service::Request;
//! use quiz_results::{results_service, Config, InMemoryRecordStore};
//! use serde_json::json;
//!
//! let service = results_service(InMemoryRecordStore::new(), Config::default());
//!
//! let saved = service.dispatch(&Request::post(&json!({
//!     "userId": "u-1",
//!     "timestamp": "2025-01-01T10:00:00.000Z",
//!     "gameId": "002_harmony_game",
//!     "score": 87.5
//! })));
//! assert_eq!(saved.status(), 200);
//!
//! let history = service.dispatch(&Request::get().with_query("userId", "u-1"));
//! assert_eq!(history.body()[0]["score"], json!(87.5));
//! ```

mod config;
pub mod handlers;
pub mod numeric;
pub mod record;
pub mod retention;
pub mod service;
pub mod store;

pub use config::{AdminKey, Config, ConfigError, FALLBACK_ADMIN_KEY};
pub use record::{NewResult, RecordError, ResultRecord, Timestamp};
pub use retention::{RetentionOutcome, RetentionPolicy};
pub use service::{HandlerError, Request, Response, Service};
pub use store::{InMemoryRecordStore, Item, RecordKey, RecordStore, StoreError};

/// The results endpoint: admin scan, leaderboard and history for `GET`
/// (in that precedence), save for `POST`.
pub fn results_service<S: RecordStore + 'static>(store: S, config: Config) -> Service<S> {
    crate::register_routes!(
        Service::new(store, config),
        handlers::admin_scan,
        handlers::leaderboard,
        handlers::history,
        handlers::save_result,
    )
}
