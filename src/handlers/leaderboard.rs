//! Leaderboard: the top results for one game, highest score first.

use serde_json::Value;

use crate::service::{Context, HandlerError, Method};
use crate::store::{IndexQuery, RecordStore, LEADERBOARD_INDEX};

use super::{render_items, GAME_ID_PARAM, TYPE_PARAM};

pub const METHOD: Method = Method::Get;
pub const ROUTE: &str = "results.leaderboard";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.query(TYPE_PARAM) == Some("leaderboard")
}

pub fn handle<S: RecordStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let game_id = ctx.require_query(GAME_ID_PARAM, "Missing gameId parameter for leaderboard")?;

    let query = IndexQuery::new(LEADERBOARD_INDEX.name, game_id)
        .descending()
        .limit(ctx.config().leaderboard_limit);
    let items = ctx
        .store()
        .query_by_index(query)
        .map_err(HandlerError::store("Leaderboard query failed"))?;

    Ok(render_items(&items))
}
