//! Error types for the store.

use docmap_model::{AttributeValueType, SchemaError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Schema could not be built.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Table config file could not be parsed.
    #[error("invalid table config: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Item or key lacks a primary key attribute.
    #[error("missing key attribute: {0}")]
    MissingKeyAttribute(String),

    /// Primary key attribute has the wrong type.
    #[error("key attribute {attribute} expected {expected:?}, found {found:?}")]
    InvalidKeyType {
        attribute: String,
        expected: AttributeValueType,
        found: AttributeValueType,
    },

    /// A number key attribute is not a decimal number.
    #[error("key attribute {attribute} holds malformed number {value:?}")]
    MalformedNumberKey { attribute: String, value: String },

    /// A counter attribute holds something other than an integer.
    #[error("counter attribute {attribute} holds a {found:?} value")]
    TypeMismatch {
        attribute: String,
        found: AttributeValueType,
    },

    /// Incrementing a counter left the i64 range.
    #[error("counter attribute {0} overflowed")]
    CounterOverflow(String),
}
