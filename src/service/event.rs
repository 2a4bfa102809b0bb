//! Gateway events: API-Gateway-style JSON envelopes in and out.
//!
//! Lets the same dispatcher sit behind a function-as-a-service trigger. Both
//! payload versions are accepted: the method is read from
//! `requestContext.http.method` and falls back to the top-level `httpMethod`.
//!
//! ```json
//! {
//!   "requestContext": { "http": { "method": "GET" } },
//!   "queryStringParameters": { "userId": "u-42" },
//!   "headers": { "origin": "https://example.com" },
//!   "body": null
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::request::{Method, Request, Response};

/// An inbound gateway event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

impl GatewayEvent {
    /// The request method; an event without one maps to an empty `Other` method.
    pub fn method(&self) -> Method {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.http.as_ref())
            .and_then(|http| http.method.as_deref())
            .or(self.http_method.as_deref())
            .map(Method::from)
            .unwrap_or_else(|| Method::Other(String::new()))
    }

    pub fn to_request(&self) -> Request {
        let query = self.query_string_parameters.clone().unwrap_or_default();
        let mut request = Request::new(self.method()).with_query_map(query);

        for (name, value) in self.headers.iter().flatten() {
            request = request.with_header(name, value.clone());
        }
        if let Some(body) = &self.body {
            request = request.with_body(body.clone());
        }
        request
    }
}

/// An outbound gateway response; `body` is the JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<Response> for GatewayResponse {
    fn from(response: Response) -> Self {
        Self {
            status_code: response.status(),
            headers: response.headers().clone(),
            body: response.into_body().to_string(),
        }
    }
}
