//! Admin scan: every record in the store, for holders of the admin secret.
//!
//! Registered first so a matching `adminKey` wins over any other parameter.
//! A wrong or missing key is not an error; the guard declines and the
//! request falls through to the user-facing routes.

use serde_json::Value;
use tracing::info;

use crate::service::{Context, HandlerError, Method};
use crate::store::RecordStore;

use super::{render_items, ADMIN_KEY_PARAM};

pub const METHOD: Method = Method::Get;
pub const ROUTE: &str = "results.admin_scan";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.query(ADMIN_KEY_PARAM)
        .is_some_and(|key| ctx.config().admin_key.matches(key))
}

pub fn handle<S: RecordStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let items = ctx
        .store()
        .scan_all()
        .map_err(HandlerError::store("Scan failed"))?;

    info!(count = items.len(), "admin scan served");
    Ok(render_items(&items))
}
