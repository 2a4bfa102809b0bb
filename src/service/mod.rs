//! service: request dispatch over an ordered route table.
//!
//! Build a dispatcher by registering routes on a `Service`. Each route
//! receives a `Context<S>` with access to the request, the record store, and
//! the configuration. Every response, including errors and the `OPTIONS`
//! short-circuit, carries the same CORS header set.
//!
//! ## Route Convention
//!
//! Each route module exports:
//!
//! ```ignore
//! // src/handlers/history.rs
//!
//! pub const METHOD: Method = Method::Get;
//! pub const ROUTE: &str = "results.history";
//!
//! pub fn guard<S>(ctx: &Context<S>) -> bool {
//!     true
//! }
//!
//! pub fn handle<S: RecordStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
//!     let user_id = ctx.require_query("userId", "Missing userId or adminKey parameter")?;
//!     // ...
//! }
//! ```

mod context;
mod error;
mod event;
mod request;
mod service;

pub use context::Context;
pub use error::{HandlerError, INTERNAL_SERVER_ERROR};
pub use event::{GatewayEvent, GatewayResponse, HttpContext, RequestContext};
pub use request::{Method, Request, Response, CORS_HEADERS};
pub use service::Service;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register route modules with a service, in precedence order.
///
/// Each route module must export:
/// - `METHOD: Method` - the method it answers
/// - `ROUTE: &str` - the route name
/// - `guard(ctx) -> bool` - whether this route takes the request
/// - `handle(ctx) -> Result<Value, HandlerError>` - the handler
///
/// # Example
/// ```ignore
/// let service = quiz_results::register_routes!(
///     Service::new(InMemoryRecordStore::new(), Config::default()),
///     handlers::admin_scan,
///     handlers::history,
/// );
/// ```
#[macro_export]
macro_rules! register_routes {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .route(
                $($seg)::+::METHOD,
                $($seg)::+::ROUTE,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
