use docmap_model::{Item, TableMetadata};

/// The store operation an item is about to be written by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    /// Unconditional full-item write.
    PutItem,
    /// Partial update; counters are incremented by the store itself.
    UpdateItem,
}

/// What a [`WriteExtension`](crate::WriteExtension) sees before a write.
#[derive(Debug, Clone, Copy)]
pub struct BeforeWriteContext<'a> {
    items: &'a Item,
    table_metadata: &'a TableMetadata,
    operation_name: OperationName,
}

impl<'a> BeforeWriteContext<'a> {
    pub fn new(items: &'a Item, table_metadata: &'a TableMetadata, operation_name: OperationName) -> Self {
        Self {
            items,
            table_metadata,
            operation_name,
        }
    }

    /// The full outgoing item.
    pub fn items(&self) -> &'a Item {
        self.items
    }

    pub fn table_metadata(&self) -> &'a TableMetadata {
        self.table_metadata
    }

    pub fn operation_name(&self) -> OperationName {
        self.operation_name
    }
}

/// Result of a `before_write` hook.
///
/// A replacement is always a complete item, never a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WriteModification {
    #[default]
    Unchanged,
    Replace(Item),
}

impl WriteModification {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn transformed_item(&self) -> Option<&Item> {
        match self {
            Self::Unchanged => None,
            Self::Replace(item) => Some(item),
        }
    }

    pub fn into_transformed_item(self) -> Option<Item> {
        match self {
            Self::Unchanged => None,
            Self::Replace(item) => Some(item),
        }
    }
}
