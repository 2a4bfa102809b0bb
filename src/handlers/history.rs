//! History: every result of one user, oldest first.

use serde_json::Value;

use crate::service::{Context, HandlerError, Method, INTERNAL_SERVER_ERROR};
use crate::store::RecordStore;

use super::{render_items, USER_ID_PARAM};

pub const METHOD: Method = Method::Get;
pub const ROUTE: &str = "results.history";

/// Catch-all for `GET`; a missing `userId` is reported by the handler.
pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: RecordStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let user_id = ctx.require_query(USER_ID_PARAM, "Missing userId or adminKey parameter")?;

    let items = ctx
        .store()
        .query_by_owner(user_id)
        .map_err(HandlerError::store(INTERNAL_SERVER_ERROR))?;

    Ok(render_items(&items))
}
