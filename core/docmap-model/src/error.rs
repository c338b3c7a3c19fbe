//! Error types for schema construction.

use crate::AttributeValueType;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building a table schema.
///
/// Looking up tags on a built schema never fails; these only surface at
/// schema-build time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Attribute names must be non-empty.
    #[error("attribute name must not be empty")]
    EmptyAttributeName,

    /// The same attribute was declared twice.
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// No attribute was tagged as the partition key.
    #[error("table {0} has no partition key")]
    MissingPartitionKey(String),

    /// A tag of the same kind was attached twice with a different outcome.
    #[error("conflicting {kind} tag on attribute {attribute}")]
    ConflictingTag { attribute: String, kind: &'static str },

    /// An attribute was marked key-like with two different value types.
    #[error("attribute {attribute} marked as key with type {existing:?} and {requested:?}")]
    KeyTypeConflict {
        attribute: String,
        existing: AttributeValueType,
        requested: AttributeValueType,
    },

    /// Key attributes must be strings, numbers or binary.
    #[error("attribute {attribute} of type {value_type:?} cannot be a primary key")]
    InvalidKeyType {
        attribute: String,
        value_type: AttributeValueType,
    },

    /// Declarative schema could not be parsed.
    #[error("invalid schema definition: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error reading a schema file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
