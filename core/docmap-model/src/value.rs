use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A full record as sent to or read from the store: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// A single stored attribute value.
///
/// The JSON representation matches the store's wire format, e.g.
/// `{"S": "abc"}` or `{"N": "42"}`. Numbers are carried as decimal strings
/// so the store client decides how wide they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B")]
    B(Vec<u8>),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Shorthand for a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Shorthand for an integer number value.
    pub fn number(value: i64) -> Self {
        Self::N(value.to_string())
    }

    /// Parses a number value as `i64`.
    ///
    /// Returns `None` for non-number values and for numbers that do not fit.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::N(n) => n.trim().parse().ok(),
            _ => None,
        }
    }

    /// The classification of this value.
    pub fn value_type(&self) -> AttributeValueType {
        match self {
            Self::S(_) => AttributeValueType::String,
            Self::N(_) => AttributeValueType::Number,
            Self::B(_) => AttributeValueType::Binary,
            Self::Bool(_) => AttributeValueType::Bool,
            Self::Null(_) => AttributeValueType::Null,
            Self::L(_) => AttributeValueType::List,
            Self::M(_) => AttributeValueType::Map,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The value-type classification of an attribute.
///
/// Used in schema definitions (`type = "number"`) and when an attribute is
/// marked key-like in [`TableMetadata`](crate::TableMetadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValueType {
    String,
    Number,
    Binary,
    Bool,
    Null,
    List,
    Map,
}

impl AttributeValueType {
    /// Whether values of this type may form part of a primary key.
    pub fn is_scalar_key_type(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Binary)
    }
}
