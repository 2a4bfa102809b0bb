//! Save: validate a posted result, store it, then trim the owner's history.
//!
//! The put is the success signal. Retention runs afterwards and cannot turn
//! a stored result into a failed request; a failed pass is logged and left
//! for the owner's next write.

use serde_json::{json, Value};
use tracing::info;

use crate::record::NewResult;
use crate::retention::RetentionPolicy;
use crate::service::{Context, HandlerError, Method};
use crate::store::RecordStore;

pub const METHOD: Method = Method::Post;
pub const ROUTE: &str = "results.save";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: RecordStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<NewResult>()?;
    let record = input.into_record(&ctx.config().default_game_id)?;
    let item = record.to_item()?;

    ctx.store().put(item)?;
    info!(user_id = %record.user_id, game_id = %record.game_id, "result saved");

    let outcome = RetentionPolicy::new(ctx.config().retention_limit)
        .enforce(ctx.store(), &record.user_id);
    if outcome.is_deferred() {
        info!(user_id = %record.user_id, "retention will retry on the next write");
    }

    Ok(json!({ "message": "Success" }))
}
