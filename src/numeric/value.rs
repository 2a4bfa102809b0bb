use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

/// A value as the record store keeps it.
///
/// Numbers are exact decimals; everything else mirrors JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Null,
    Bool(bool),
    Number(BigDecimal),
    Text(String),
    List(Vec<StoredValue>),
    Map(BTreeMap<String, StoredValue>),
}

impl StoredValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Null => "null",
            StoredValue::Bool(_) => "bool",
            StoredValue::Number(_) => "number",
            StoredValue::Text(_) => "text",
            StoredValue::List(_) => "list",
            StoredValue::Map(_) => "map",
        }
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        StoredValue::Text(s.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        StoredValue::Text(s)
    }
}

impl From<BigDecimal> for StoredValue {
    fn from(d: BigDecimal) -> Self {
        StoredValue::Number(d)
    }
}

impl From<i64> for StoredValue {
    fn from(i: i64) -> Self {
        StoredValue::Number(BigDecimal::from(i))
    }
}
