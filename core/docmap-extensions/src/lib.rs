//! Write-path extensions for docmap.
//!
//! An extension sees every outgoing item just before the store client writes
//! it and may hand back a full replacement. Extensions are registered
//! explicitly in an [`ExtensionChain`]; none are active by default.
//!
//! - [`WriteExtension`] — the hook trait
//! - [`BeforeWriteContext`] / [`WriteModification`] — its input and output
//! - [`ExtensionChain`] — ordered dispatch across registered extensions
//! - [`AtomicCounterExtension`] — initializes counter attributes on unconditional writes

mod atomic_counter;
mod chain;
mod context;

pub use atomic_counter::AtomicCounterExtension;
pub use chain::{ExtensionChain, WriteExtension};
pub use context::{BeforeWriteContext, OperationName, WriteModification};
