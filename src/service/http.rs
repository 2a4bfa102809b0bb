//! HTTP transport: maps HTTP requests onto [`Service::dispatch`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - returns `{ "ok": true, "routes": [...] }`.
//! - anything else, on any path - dispatch. Method, query string, headers and
//!   body are handed to the route table unchanged; the response keeps its
//!   status and JSON body.
//!
//! Every response leaving the router carries [`CORS_HEADERS`], including
//! health checks.
//!
//! Dispatch runs on the blocking pool since store calls may block.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quiz_results::{service, Config, InMemoryRecordStore};
//!
//! let service = Arc::new(quiz_results::results_service(InMemoryRecordStore::new(), Config::default()));
//! service::serve(service, "0.0.0.0:3000", std::future::pending()).await?;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method as HttpMethod, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use super::error::HandlerError;
use super::request::{Request, Response, CORS_HEADERS};
use super::service::Service;

/// Build an axum `Router` that dispatches through the given service.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route(
            "/health",
            get(health_handler::<S>).fallback(dispatch_handler::<S>),
        )
        .fallback(dispatch_handler::<S>)
        .layer(middleware::map_response(with_cors))
        .with_state(service)
}

async fn with_cors(mut response: axum::response::Response) -> axum::response::Response {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            headers.insert(name, HeaderValue::from_static(value));
        }
    }
    response
}

/// Serve over HTTP at `addr` until `shutdown` resolves.
pub async fn serve<S, F>(
    service: Arc<Service<S>>,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health` - returns `{ "ok": true, "routes": [...] }`.
async fn health_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> impl IntoResponse {
    let routes: Vec<&str> = service.routes();
    Json(json!({ "ok": true, "routes": routes }))
}

/// Every other request: build a [`Request`] and dispatch it on the blocking pool.
async fn dispatch_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    method: HttpMethod,
    query: Option<Query<HashMap<String, String>>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    // Malformed query strings and bodies still get a CORS-tagged response.
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let body = String::from_utf8_lossy(&body).into_owned();
    let request = request_from_parts(&method, query, &headers, body);

    let response = match tokio::task::spawn_blocking(move || service.dispatch(&request)).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "dispatch task failed");
            Response::from_error(&HandlerError::Internal(e.to_string()))
        }
    };

    into_http(response)
}

fn request_from_parts(
    method: &HttpMethod,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: String,
) -> Request {
    let mut request = Request::new(method.as_str()).with_query_map(query);
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            request = request.with_header(name.as_str(), v);
        }
    }
    if !body.is_empty() {
        request = request.with_body(body);
    }
    request
}

fn into_http(response: Response) -> axum::response::Response {
    let status =
        StatusCode::from_u16(response.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in response.headers() {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    (status, headers, Json(response.into_body())).into_response()
}
