//! Attribute tags and the counter resolver.

use crate::{AttributeValueType, CounterConfig, SchemaError, SchemaResult, TableMetadata, TableMetadataBuilder};

/// A special behavior attached to one attribute of a table schema.
///
/// Tags are applied once, while the schema is built, and leave their mark in
/// the [`TableMetadata`] side tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTag {
    /// The attribute is the table's partition key.
    PartitionKey,
    /// The attribute is the table's sort key.
    SortKey,
    /// The attribute is an atomic counter.
    AtomicCounter(CounterConfig),
}

impl AttributeTag {
    pub fn partition_key() -> Self {
        Self::PartitionKey
    }

    pub fn sort_key() -> Self {
        Self::SortKey
    }

    /// Atomic counter with the default configuration (`delta = 1`, `start_value = 0`).
    pub fn atomic_counter() -> Self {
        Self::AtomicCounter(CounterConfig::DEFAULT)
    }

    /// Atomic counter with an explicit delta and start value.
    pub fn atomic_counter_with(delta: i64, start_value: i64) -> Self {
        Self::AtomicCounter(CounterConfig::new(delta, start_value))
    }

    /// Short name of the tag kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PartitionKey => "partition_key",
            Self::SortKey => "sort_key",
            Self::AtomicCounter(_) => "atomic_counter",
        }
    }

    /// Records this tag for `attribute_name` in the table metadata.
    ///
    /// Every tag also marks its attribute as key-like for `value_type`, so the
    /// store treats it the same way as other specially tagged attributes.
    pub fn modify_metadata(
        &self,
        attribute_name: &str,
        value_type: AttributeValueType,
        metadata: &mut TableMetadataBuilder,
    ) -> SchemaResult<()> {
        match self {
            Self::PartitionKey | Self::SortKey => {
                if !value_type.is_scalar_key_type() {
                    return Err(SchemaError::InvalidKeyType {
                        attribute: attribute_name.to_string(),
                        value_type,
                    });
                }
                if *self == Self::PartitionKey {
                    metadata.set_partition_key(attribute_name)?;
                } else {
                    metadata.set_sort_key(attribute_name)?;
                }
            }
            Self::AtomicCounter(config) => {
                metadata.add_counter(attribute_name, *config)?;
            }
        }
        metadata.mark_attribute_as_key(attribute_name, value_type)?;
        Ok(())
    }
}

/// Resolves the counter configuration bound to an attribute.
///
/// `None` simply means the attribute is not a counter; it is never an error.
pub fn resolve_counter(attribute_name: &str, metadata: &TableMetadata) -> Option<CounterConfig> {
    metadata.counter(attribute_name)
}
