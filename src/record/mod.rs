//! Result records: one per quiz attempt.
//!
//! [`NewResult`] is the inbound schema: every field optional so that a missing
//! `userId` or `timestamp` is a validation failure rather than a decode error.
//! The two key fields are decoded loosely and checked for JSON truthiness, so
//! `null`, `false`, `0` and `""` all read as missing.
//! [`NewResult::into_record`] applies the defaults and produces a
//! [`ResultRecord`], which converts into a store [`Item`] through the numeric
//! normalizer.

mod timestamp;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::numeric::{self, NumericError, StoredValue};
use crate::store::Item;

pub use timestamp::Timestamp;

pub const USER_ID: &str = "userId";
pub const TIMESTAMP: &str = "timestamp";
pub const GAME_ID: &str = "gameId";
pub const NAME: &str = "name";
pub const LEVEL: &str = "level";
pub const SCORE: &str = "score";
pub const TOTAL: &str = "total";
pub const RATE: &str = "rate";
pub const SETTINGS: &str = "settings";

/// Game assigned to results posted without a `gameId` (the original chord quiz).
pub const DEFAULT_GAME_ID: &str = "001_chord_quiz";
/// Display name for results posted without a `name`.
pub const DEFAULT_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Missing required fields: userId, timestamp")]
    MissingRequiredFields,

    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Inbound result payload as posted by a game client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResult {
    pub user_id: Option<Value>,
    pub timestamp: Option<Value>,
    pub game_id: Option<String>,
    pub name: Option<String>,
    pub level: Option<Number>,
    pub score: Option<Number>,
    pub total: Option<Number>,
    pub rate: Option<Number>,
    pub settings: Option<Map<String, Value>>,
}

impl NewResult {
    /// Validate the required keys and fill in defaults.
    ///
    /// Falsy keys count as missing; present keys of the wrong type are invalid.
    pub fn into_record(self, default_game_id: &str) -> Result<ResultRecord, RecordError> {
        let (Some(user_id), Some(timestamp)) = (present(self.user_id), present(self.timestamp))
        else {
            return Err(RecordError::MissingRequiredFields);
        };

        let user_id = match user_id {
            Value::String(id) => id,
            _ => {
                return Err(RecordError::InvalidField {
                    field: USER_ID,
                    expected: "a string",
                })
            }
        };
        let timestamp = Timestamp::try_from(timestamp)?;

        Ok(ResultRecord {
            user_id,
            timestamp,
            game_id: self.game_id.unwrap_or_else(|| default_game_id.to_string()),
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            level: self.level,
            score: self.score.unwrap_or_else(|| Number::from(0)),
            total: self.total,
            rate: self.rate,
            settings: self.settings.unwrap_or_default(),
        })
    }
}

/// A validated quiz result with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub user_id: String,
    pub timestamp: Timestamp,
    pub game_id: String,
    pub name: String,
    pub level: Option<Number>,
    pub score: Number,
    pub total: Option<Number>,
    pub rate: Option<Number>,
    pub settings: Map<String, Value>,
}

impl ResultRecord {
    /// Build the store item, converting every number to an exact decimal.
    ///
    /// Absent optional numbers are stored as explicit nulls.
    pub fn to_item(&self) -> Result<Item, NumericError> {
        let mut item = Item::new();
        item.insert(USER_ID.into(), StoredValue::Text(self.user_id.clone()));
        item.insert(TIMESTAMP.into(), self.timestamp.to_stored()?);
        item.insert(GAME_ID.into(), StoredValue::Text(self.game_id.clone()));
        item.insert(NAME.into(), StoredValue::Text(self.name.clone()));
        item.insert(LEVEL.into(), optional_number(self.level.as_ref())?);
        item.insert(
            SCORE.into(),
            StoredValue::Number(numeric::decimal_from_number(&self.score)?),
        );
        item.insert(TOTAL.into(), optional_number(self.total.as_ref())?);
        item.insert(RATE.into(), optional_number(self.rate.as_ref())?);
        item.insert(
            SETTINGS.into(),
            numeric::to_stored(&Value::Object(self.settings.clone()))?,
        );
        Ok(item)
    }
}

/// JSON truthiness: null, false, zero, empty strings and empty containers are absent.
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

fn optional_number(number: Option<&Number>) -> Result<StoredValue, NumericError> {
    match number {
        Some(n) => Ok(StoredValue::Number(numeric::decimal_from_number(n)?)),
        None => Ok(StoredValue::Null),
    }
}
