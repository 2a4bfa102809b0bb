//! Service: ordered route table and dispatch.
//!
//! `Service<S>` holds a record store, the configuration, and a list of
//! routes. Each route names a method, a guard, and a handler. Dispatch walks
//! the routes in registration order and runs the first one whose method
//! matches and whose guard accepts the request, so precedence between read
//! modes is the order they were registered in.
//!
//! ## Example
//!
//! ```
//! use quiz_results::service::{Method, Request, Service};
//! use quiz_results::{Config, InMemoryRecordStore};
//! use serde_json::json;
//!
//! let service = Service::new(InMemoryRecordStore::new(), Config::default())
//!     .route(Method::Get, "ping", |_ctx| true, |_ctx| Ok(json!({ "pong": true })));
//!
//! let response = service.dispatch(&Request::get());
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), &json!({ "pong": true }));
//! ```

use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::Config;

use super::context::Context;
use super::error::HandlerError;
use super::event::{GatewayEvent, GatewayResponse};
use super::request::{Method, Request, Response};

type Guard<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type Handler<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered route.
struct Route<S> {
    method: Method,
    name: String,
    guard: Guard<S>,
    handle: Handler<S>,
}

/// A request dispatcher over a record store.
pub struct Service<S> {
    store: S,
    config: Config,
    routes: Vec<Route<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a service with no routes. `OPTIONS` is always answered.
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            routes: Vec::new(),
        }
    }

    /// Append a route. Earlier routes take precedence.
    pub fn route<G, F>(mut self, method: Method, name: &str, guard: G, handle: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            name: name.to_string(),
            guard: Box::new(guard),
            handle: Box::new(handle),
        });
        self
    }

    /// Handle one request. Never fails: every outcome becomes a response
    /// carrying the CORS header set.
    pub fn dispatch(&self, request: &Request) -> Response {
        if *request.method() == Method::Options {
            return Response::ok(json!({ "message": "OK" }));
        }

        match self.select(request) {
            Ok(body) => Response::ok(body),
            Err(err) => {
                if err.status_code() >= 500 {
                    error!(method = %request.method(), error = %err, "request failed");
                } else {
                    debug!(method = %request.method(), error = %err, "request rejected");
                }
                Response::from_error(&err)
            }
        }
    }

    /// Dispatch a gateway event, returning a gateway response.
    pub fn dispatch_event(&self, event: &GatewayEvent) -> GatewayResponse {
        let request = event.to_request();
        GatewayResponse::from(self.dispatch(&request))
    }

    fn select(&self, request: &Request) -> Result<Value, HandlerError> {
        let ctx = Context::new(request, &self.store, &self.config);
        let mut candidates = self
            .routes
            .iter()
            .filter(|route| route.method == *request.method())
            .peekable();

        if candidates.peek().is_none() {
            return Err(HandlerError::UnsupportedMethod(request.method().to_string()));
        }

        for route in candidates {
            if (route.guard)(&ctx) {
                debug!(route = %route.name, "route selected");
                return (route.handle)(&ctx);
            }
        }

        Err(HandlerError::NoRoute(request.method().to_string()))
    }

    /// Registered route names, in precedence order.
    pub fn routes(&self) -> Vec<&str> {
        self.routes.iter().map(|route| route.name.as_str()).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
