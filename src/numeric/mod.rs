//! Numeric normalization between native JSON values and stored values.
//!
//! The record store keeps every number as an exact [`BigDecimal`]. On the way
//! in, each JSON number is parsed from its shortest decimal text (`87.5` is
//! stored as exactly `87.5`, not the binary expansion of the float). On the
//! way out, integral decimals become JSON integers and everything else becomes
//! a JSON float, so a stored `90.0` reads back as `90`.
//!
//! ## Example
//!
//! ```
//! use quiz_results::numeric::{to_native, to_stored};
//! use serde_json::json;
//!
//! let stored = to_stored(&json!({ "score": 87.5, "level": 3.0 })).unwrap();
//! assert_eq!(to_native(&stored), json!({ "score": 87.5, "level": 3 }));
//! ```

mod value;

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub use value::StoredValue;

/// Failure converting a native value into its stored form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// The number's text could not be parsed as a decimal.
    #[error("number {0} has no exact decimal form")]
    InexactNumber(String),
}

/// Convert a native JSON value into the store's representation.
///
/// Recurses through arrays and objects; every number becomes a decimal.
pub fn to_stored(value: &Value) -> Result<StoredValue, NumericError> {
    Ok(match value {
        Value::Null => StoredValue::Null,
        Value::Bool(b) => StoredValue::Bool(*b),
        Value::Number(n) => StoredValue::Number(decimal_from_number(n)?),
        Value::String(s) => StoredValue::Text(s.clone()),
        Value::Array(items) => StoredValue::List(
            items
                .iter()
                .map(to_stored)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(fields) => StoredValue::Map(
            fields
                .iter()
                .map(|(k, v)| to_stored(v).map(|stored| (k.clone(), stored)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

/// Convert a stored value back into native JSON.
pub fn to_native(value: &StoredValue) -> Value {
    match value {
        StoredValue::Null => Value::Null,
        StoredValue::Bool(b) => Value::Bool(*b),
        StoredValue::Number(d) => number_from_decimal(d),
        StoredValue::Text(s) => Value::String(s.clone()),
        StoredValue::List(items) => Value::Array(items.iter().map(to_native).collect()),
        StoredValue::Map(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), to_native(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Parse a JSON number into a decimal using its rendered text.
pub fn decimal_from_number(number: &Number) -> Result<BigDecimal, NumericError> {
    let rendered = number.to_string();
    BigDecimal::from_str(&rendered).map_err(|_| NumericError::InexactNumber(rendered))
}

/// Integral decimals become integers, the rest become floats.
///
/// Integers outside the 64-bit range fall back to the nearest float.
pub fn number_from_decimal(decimal: &BigDecimal) -> Value {
    if decimal.is_integer() {
        if let Some(i) = decimal.to_i64() {
            return Value::from(i);
        }
        if let Some(u) = decimal.to_u64() {
            return Value::from(u);
        }
    }

    decimal
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
