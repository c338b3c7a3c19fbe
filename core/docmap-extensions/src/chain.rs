use crate::{BeforeWriteContext, WriteModification};
use std::sync::Arc;
use tracing::debug;

/// A hook on the write path of the store client.
///
/// Implementations must be pure with respect to their inputs: they may not
/// mutate the context's item, only return a replacement.
pub trait WriteExtension: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Called before an item is written.
    /// Default implementation leaves the item unchanged.
    fn before_write(&self, context: &BeforeWriteContext<'_>) -> WriteModification {
        let _ = context;
        WriteModification::Unchanged
    }
}

/// Ordered set of registered extensions.
///
/// Each extension sees the item as transformed by the ones before it.
#[derive(Clone, Default)]
pub struct ExtensionChain {
    extensions: Vec<Arc<dyn WriteExtension>>,
}

impl ExtensionChain {
    /// An empty chain; writes pass through untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an extension.
    #[must_use]
    pub fn with(mut self, extension: impl WriteExtension + 'static) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Names of the registered extensions, in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().map(|e| e.name())
    }

    /// Runs every extension in order.
    ///
    /// Returns [`WriteModification::Unchanged`] when no extension replaced the item.
    pub fn before_write(&self, context: &BeforeWriteContext<'_>) -> WriteModification {
        let mut current: Option<docmap_model::Item> = None;

        for extension in &self.extensions {
            let items = current.as_ref().unwrap_or(context.items());
            let step = BeforeWriteContext::new(items, context.table_metadata(), context.operation_name());
            if let WriteModification::Replace(item) = extension.before_write(&step) {
                debug!(extension = extension.name(), "Extension replaced outgoing item");
                current = Some(item);
            }
        }

        current.map_or(WriteModification::Unchanged, WriteModification::Replace)
    }
}

impl std::fmt::Debug for ExtensionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
