//! Atomic counter extension.
//!
//! Tagging an attribute as an atomic counter is enough for partial updates:
//! the store increments it natively. Unconditional writes replace the whole
//! item, so without this extension a counter would be written with whatever
//! the caller happened to put in the record. Registered, the extension
//! overwrites every counter attribute of the outgoing item with the counter's
//! configured start value. Partial updates pass through untouched.
//!
//! The extension is not part of the default chain:
//!
//! ```
//! use docmap_extensions::{AtomicCounterExtension, ExtensionChain};
//!
//! let chain = ExtensionChain::new().with(AtomicCounterExtension::create());
//! assert_eq!(chain.len(), 1);
//! ```

use crate::{BeforeWriteContext, OperationName, WriteExtension, WriteModification};
use docmap_model::{CounterConfig, resolve_counter};
use tracing::debug;

/// Initializes atomic counter attributes to their start value on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicCounterExtension {
    _private: (),
}

impl AtomicCounterExtension {
    pub fn create() -> Self {
        Self::default()
    }
}

impl WriteExtension for AtomicCounterExtension {
    fn name(&self) -> &'static str {
        "atomic_counter"
    }

    fn before_write(&self, context: &BeforeWriteContext<'_>) -> WriteModification {
        if context.operation_name() == OperationName::UpdateItem {
            return WriteModification::Unchanged;
        }
        let metadata = context.table_metadata();
        // Empty when no attribute is a counter, and an empty Vec does not allocate.
        let counters: Vec<(&String, CounterConfig)> = context
            .items()
            .keys()
            .filter_map(|name| resolve_counter(name, metadata).map(|c| (name, c)))
            .collect();

        if counters.is_empty() {
            return WriteModification::Unchanged;
        }

        debug!(
            operation = ?context.operation_name(),
            counters = counters.len(),
            "Initializing atomic counters to start values"
        );

        let mut item = context.items().clone();
        for (name, counter) in counters {
            item.insert(name.clone(), counter.start_attribute_value());
        }
        WriteModification::Replace(item)
    }
}
