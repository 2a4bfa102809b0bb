//! Context passed to route handlers.
//!
//! Carries the request, the record store, and the service configuration.
//! Handlers reach everything they need through the context.

use serde::de::DeserializeOwned;

use crate::config::Config;

use super::error::HandlerError;
use super::request::{Method, Request};

/// The context passed to every route guard and handler.
///
/// Generic over `S` (the store type) so handlers work against whichever
/// `RecordStore` the service was built with.
pub struct Context<'a, S> {
    request: &'a Request,
    store: &'a S,
    config: &'a Config,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(request: &'a Request, store: &'a S, config: &'a Config) -> Self {
        Self {
            request,
            store,
            config,
        }
    }

    /// Deserialize the JSON body into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let body = self.request.json_body()?;
        serde_json::from_value(body).map_err(HandlerError::from)
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// A non-empty query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.request.query(name)
    }

    /// A non-empty query parameter, or a validation error carrying `message`.
    pub fn require_query(&self, name: &str, message: &str) -> Result<&str, HandlerError> {
        self.query(name)
            .ok_or_else(|| HandlerError::validation(message))
    }

    pub fn store(&self) -> &S {
        self.store
    }

    pub fn config(&self) -> &Config {
        self.config
    }
}
