use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{RecordError, TIMESTAMP};
use crate::numeric::{self, NumericError, StoredValue};

/// The sort key of a result: an ISO-8601 string from browser clients, or a
/// number (epoch millis) from older ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Number(Number),
    Text(String),
}

impl Timestamp {
    pub fn to_stored(&self) -> Result<StoredValue, NumericError> {
        match self {
            Timestamp::Text(s) => Ok(StoredValue::Text(s.clone())),
            Timestamp::Number(n) => Ok(StoredValue::Number(numeric::decimal_from_number(n)?)),
        }
    }
}

impl TryFrom<Value> for Timestamp {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Timestamp::Text(s)),
            Value::Number(n) => Ok(Timestamp::Number(n)),
            _ => Err(RecordError::InvalidField {
                field: TIMESTAMP,
                expected: "a string or number",
            }),
        }
    }
}
