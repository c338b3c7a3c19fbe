use crate::{AttributeTag, AttributeValueType, CounterConfig, SchemaError, SchemaResult, TableMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One attribute of a table schema with the tags attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    name: String,
    value_type: AttributeValueType,
    tags: Vec<AttributeTag>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, value_type: AttributeValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            tags: Vec::new(),
        }
    }

    /// Shorthand for a string attribute.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeValueType::String)
    }

    /// Shorthand for a number attribute.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, AttributeValueType::Number)
    }

    /// Attaches a tag to this attribute.
    #[must_use]
    pub fn tag(mut self, tag: AttributeTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> AttributeValueType {
        self.value_type
    }

    pub fn tags(&self) -> &[AttributeTag] {
        &self.tags
    }
}

/// A table's attributes plus the metadata their tags produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table_name: String,
    attributes: Vec<AttributeSchema>,
    metadata: TableMetadata,
}

impl TableSchema {
    /// Starts a builder for the static tagging surface.
    pub fn builder(table_name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            table_name: table_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Parses a declarative schema from TOML.
    pub fn from_toml_str(toml_str: &str) -> SchemaResult<Self> {
        let definition: TableDefinition = toml::from_str(toml_str)?;
        definition.into_schema()
    }

    /// Reads a declarative schema from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn attributes(&self) -> &[AttributeSchema] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn table_metadata(&self) -> &TableMetadata {
        &self.metadata
    }
}

/// Builder for [`TableSchema`].
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    table_name: String,
    attributes: Vec<AttributeSchema>,
}

impl TableSchemaBuilder {
    #[must_use]
    pub fn add_attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Applies every tag to fresh metadata and validates the result.
    pub fn build(self) -> SchemaResult<TableSchema> {
        let mut seen = HashSet::new();
        let mut metadata = TableMetadata::builder();

        for attribute in &self.attributes {
            if attribute.name.is_empty() {
                return Err(SchemaError::EmptyAttributeName);
            }
            if !seen.insert(attribute.name.as_str()) {
                return Err(SchemaError::DuplicateAttribute(attribute.name.clone()));
            }
            for tag in &attribute.tags {
                tag.modify_metadata(&attribute.name, attribute.value_type, &mut metadata)?;
            }
        }

        if metadata.partition_key().is_none() {
            return Err(SchemaError::MissingPartitionKey(self.table_name));
        }

        Ok(TableSchema {
            table_name: self.table_name,
            attributes: self.attributes,
            metadata: metadata.build(),
        })
    }
}

/// Declarative table definition, as written in TOML or JSON.
///
/// ```toml
/// name = "records"
///
/// [[attributes]]
/// name = "id"
/// type = "string"
/// partition_key = true
///
/// [[attributes]]
/// name = "balance"
/// type = "number"
/// atomic_counter = { delta = -5, start_value = 15 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDefinition {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

/// One attribute in a [`TableDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: AttributeValueType,
    #[serde(default)]
    pub partition_key: bool,
    #[serde(default)]
    pub sort_key: bool,
    /// `atomic_counter = {}` tags the attribute with the default counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_counter: Option<CounterConfig>,
}

impl AttributeDefinition {
    fn into_attribute_schema(self) -> AttributeSchema {
        let mut attribute = AttributeSchema::new(self.name, self.value_type);
        if self.partition_key {
            attribute = attribute.tag(AttributeTag::partition_key());
        }
        if self.sort_key {
            attribute = attribute.tag(AttributeTag::sort_key());
        }
        if let Some(config) = self.atomic_counter {
            attribute = attribute.tag(AttributeTag::AtomicCounter(config));
        }
        attribute
    }
}

impl TableDefinition {
    /// Builds the schema through the same path as the static builder.
    pub fn into_schema(self) -> SchemaResult<TableSchema> {
        self.attributes
            .into_iter()
            .fold(TableSchema::builder(self.name), |builder, attribute| {
                builder.add_attribute(attribute.into_attribute_schema())
            })
            .build()
    }
}
