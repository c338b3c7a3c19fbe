//! In-memory table store for docmap.
//!
//! Stands in for the key-value store client on the write path:
//!
//! - [`MemoryTable::put_item`] — unconditional full-item write, run through the
//!   registered [`ExtensionChain`](docmap_extensions::ExtensionChain)
//! - [`MemoryTable::update_item`] — partial update where every atomic counter of
//!   the schema is incremented natively: `(stored or start_value) + delta`
//! - [`TableConfig`] — TOML table file combining a declarative schema with the
//!   set of enabled extensions
//!
//! Counter values supplied by callers are ignored on both paths.

mod config;
mod error;
mod table;

pub use config::{ExtensionsConfig, TableConfig};
pub use error::{StoreError, StoreResult};
pub use table::MemoryTable;
