//! Table config files.
//!
//! ```toml
//! [table]
//! name = "records"
//!
//! [[table.attributes]]
//! name = "id"
//! type = "string"
//! partition_key = true
//!
//! [[table.attributes]]
//! name = "count"
//! type = "number"
//! atomic_counter = {}
//!
//! [extensions]
//! atomic_counter = true
//! ```

use crate::StoreResult;
use docmap_extensions::{AtomicCounterExtension, ExtensionChain};
use docmap_model::{TableDefinition, TableSchema};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which write extensions a table registers. All are off unless enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionsConfig {
    #[serde(default)]
    pub atomic_counter: bool,
}

impl ExtensionsConfig {
    /// Builds the chain of enabled extensions.
    pub fn build_chain(&self) -> ExtensionChain {
        let mut chain = ExtensionChain::new();
        if self.atomic_counter {
            chain = chain.with(AtomicCounterExtension::create());
        }
        chain
    }
}

/// A parsed table config: schema plus enabled extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub schema: TableSchema,
    pub extensions: ExtensionsConfig,
}

impl TableConfig {
    pub fn from_toml_str(toml_str: &str) -> StoreResult<Self> {
        let file: TableFile = toml::from_str(toml_str)?;
        file.into_config()
    }

    pub fn load_from(path: impl AsRef<Path>) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Raw TOML structure matching the table file format.
#[derive(Deserialize)]
struct TableFile {
    table: TableDefinition,
    #[serde(default)]
    extensions: ExtensionsConfig,
}

impl TableFile {
    fn into_config(self) -> StoreResult<TableConfig> {
        Ok(TableConfig {
            schema: self.table.into_schema()?,
            extensions: self.extensions,
        })
    }
}
