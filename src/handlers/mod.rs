//! Route handlers for the results endpoint.
//!
//! Registered in precedence order by [`crate::results_service`]:
//! admin scan, leaderboard, history (all `GET`), then save (`POST`).

pub mod admin_scan;
pub mod history;
pub mod leaderboard;
pub mod save_result;

use serde_json::Value;

use crate::numeric;
use crate::store::Item;

pub const ADMIN_KEY_PARAM: &str = "adminKey";
pub const USER_ID_PARAM: &str = "userId";
pub const GAME_ID_PARAM: &str = "gameId";
pub const TYPE_PARAM: &str = "type";

/// Render stored items as a JSON array, normalizing every number.
pub fn render_items(items: &[Item]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| {
                Value::Object(
                    item.iter()
                        .map(|(name, value)| (name.clone(), numeric::to_native(value)))
                        .collect(),
                )
            })
            .collect(),
    )
}
