//! Table-level metadata built from attribute tags.
//!
//! Each tag kind gets its own typed side table keyed by attribute name, so
//! a counter binding can never collide with key metadata or any other tag.

use crate::{AttributeTag, AttributeValueType, CounterConfig, SchemaError, SchemaResult};
use std::collections::HashMap;

/// Read-only metadata of a built table schema.
///
/// Shared freely across concurrent writers once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMetadata {
    partition_key: Option<String>,
    sort_key: Option<String>,
    key_attributes: HashMap<String, AttributeValueType>,
    counters: HashMap<String, CounterConfig>,
}

impl TableMetadata {
    /// Starts an empty builder.
    pub fn builder() -> TableMetadataBuilder {
        TableMetadataBuilder::default()
    }

    /// Counter configuration bound to `attribute_name`, if any.
    pub fn counter(&self, attribute_name: &str) -> Option<CounterConfig> {
        self.counters.get(attribute_name).copied()
    }

    pub fn is_counter(&self, attribute_name: &str) -> bool {
        self.counters.contains_key(attribute_name)
    }

    /// All counter bindings of the table.
    pub fn counters(&self) -> impl Iterator<Item = (&str, CounterConfig)> {
        self.counters.iter().map(|(name, c)| (name.as_str(), *c))
    }

    /// Value type an attribute was marked key-like with.
    pub fn key_attribute_type(&self, attribute_name: &str) -> Option<AttributeValueType> {
        self.key_attributes.get(attribute_name).copied()
    }

    pub fn partition_key(&self) -> Option<&str> {
        self.partition_key.as_deref()
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Partition key followed by the sort key, when present.
    pub fn primary_key_names(&self) -> impl Iterator<Item = &str> {
        self.partition_key().into_iter().chain(self.sort_key())
    }

    pub fn is_primary_key(&self, attribute_name: &str) -> bool {
        self.partition_key() == Some(attribute_name) || self.sort_key() == Some(attribute_name)
    }
}

/// Mutable stage of [`TableMetadata`], populated by attribute tags.
#[derive(Debug, Clone, Default)]
pub struct TableMetadataBuilder {
    partition_key: Option<String>,
    sort_key: Option<String>,
    key_attributes: HashMap<String, AttributeValueType>,
    counters: HashMap<String, CounterConfig>,
}

impl TableMetadataBuilder {
    /// Binds a counter configuration to an attribute.
    ///
    /// Re-binding the same configuration is a no-op; a different one is a conflict.
    pub fn add_counter(
        &mut self,
        attribute_name: &str,
        config: CounterConfig,
    ) -> SchemaResult<&mut Self> {
        match self.counters.get(attribute_name) {
            Some(existing) if *existing != config => Err(SchemaError::ConflictingTag {
                attribute: attribute_name.to_string(),
                kind: AttributeTag::AtomicCounter(config).kind(),
            }),
            Some(_) => Ok(self),
            None => {
                self.counters.insert(attribute_name.to_string(), config);
                Ok(self)
            }
        }
    }

    /// Records that an attribute is key-like for the given value type.
    pub fn mark_attribute_as_key(
        &mut self,
        attribute_name: &str,
        value_type: AttributeValueType,
    ) -> SchemaResult<&mut Self> {
        if let Some(&existing) = self.key_attributes.get(attribute_name) {
            if existing != value_type {
                return Err(SchemaError::KeyTypeConflict {
                    attribute: attribute_name.to_string(),
                    existing,
                    requested: value_type,
                });
            }
            return Ok(self);
        }
        self.key_attributes.insert(attribute_name.to_string(), value_type);
        Ok(self)
    }

    pub fn set_partition_key(&mut self, attribute_name: &str) -> SchemaResult<&mut Self> {
        Self::set_key(&mut self.partition_key, attribute_name, AttributeTag::PartitionKey.kind())?;
        Ok(self)
    }

    pub fn set_sort_key(&mut self, attribute_name: &str) -> SchemaResult<&mut Self> {
        Self::set_key(&mut self.sort_key, attribute_name, AttributeTag::SortKey.kind())?;
        Ok(self)
    }

    fn set_key(slot: &mut Option<String>, attribute_name: &str, kind: &'static str) -> SchemaResult<()> {
        if slot.as_deref().is_some_and(|existing| existing != attribute_name) {
            return Err(SchemaError::ConflictingTag {
                attribute: attribute_name.to_string(),
                kind,
            });
        }
        *slot = Some(attribute_name.to_string());
        Ok(())
    }

    pub fn partition_key(&self) -> Option<&str> {
        self.partition_key.as_deref()
    }

    pub fn build(self) -> TableMetadata {
        TableMetadata {
            partition_key: self.partition_key,
            sort_key: self.sort_key,
            key_attributes: self.key_attributes,
            counters: self.counters,
        }
    }
}
