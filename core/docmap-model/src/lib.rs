//! Core document model for docmap.
//!
//! Defines the types the mapping layer and the store client agree on:
//! - [`AttributeValue`] / [`Item`] — the wire shape of a stored record
//! - [`TableSchema`] — a table's attributes and the tags attached to them
//! - [`TableMetadata`] — the typed side tables built from those tags
//! - [`AttributeTag`] — the kinds of special attribute behavior (keys, atomic counters)
//! - [`CounterConfig`] — delta and start value of an atomic counter
//!
//! Schemas are built once, either through [`TableSchemaBuilder`] or from a
//! declarative TOML definition, and are read-only afterwards.

mod counter;
mod error;
mod metadata;
mod schema;
mod tag;
mod value;

pub use counter::{CounterConfig, DEFAULT_DELTA, DEFAULT_START_VALUE};
pub use error::{SchemaError, SchemaResult};
pub use metadata::{TableMetadata, TableMetadataBuilder};
pub use schema::{AttributeDefinition, AttributeSchema, TableDefinition, TableSchema, TableSchemaBuilder};
pub use tag::{AttributeTag, resolve_counter};
pub use value::{AttributeValue, AttributeValueType, Item};
