//! Dynamically typed metadata values.

use serde::Serialize;
use std::collections::BTreeMap;

/// A flat key/value mapping read from a metadata header or variable file.
///
/// Only top-level keys take part in precedence resolution; nested tables are
/// carried as single [`MetadataValue::Table`] values.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A single metadata value.
///
/// Serializes untagged, so templates see plain strings, numbers, lists and
/// maps rather than the enum structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Date/time values, kept as their RFC 3339 text.
    Datetime(String),
    Array(Vec<MetadataValue>),
    Table(Metadata),
}

impl MetadataValue {
    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the table payload, if this is a table.
    pub fn as_table(&self) -> Option<&Metadata> {
        match self {
            MetadataValue::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<toml::Value> for MetadataValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => MetadataValue::String(s),
            toml::Value::Integer(i) => MetadataValue::Integer(i),
            toml::Value::Float(x) => MetadataValue::Float(x),
            toml::Value::Boolean(b) => MetadataValue::Boolean(b),
            toml::Value::Datetime(dt) => MetadataValue::Datetime(dt.to_string()),
            toml::Value::Array(items) => {
                MetadataValue::Array(items.into_iter().map(MetadataValue::from).collect())
            }
            toml::Value::Table(table) => MetadataValue::Table(from_toml_table(table)),
        }
    }
}

/// Convert a parsed TOML table into [`Metadata`].
pub fn from_toml_table(table: toml::Table) -> Metadata {
    table.into_iter().map(|(k, v)| (k, MetadataValue::from(v))).collect()
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(i: i64) -> Self {
        MetadataValue::Integer(i)
    }
}

impl From<f64> for MetadataValue {
    fn from(x: f64) -> Self {
        MetadataValue::Float(x)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Boolean(b)
    }
}

impl<T: Into<MetadataValue>> From<Vec<T>> for MetadataValue {
    fn from(items: Vec<T>) -> Self {
        MetadataValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for MetadataValue {
    fn from(table: Metadata) -> Self {
        MetadataValue::Table(table)
    }
}
