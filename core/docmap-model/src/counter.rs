//! Atomic counter configuration.
//!
//! A counter attribute is never written with the caller's value. On an
//! unconditional write it is initialized to `start_value`; on a partial update
//! the store adds `delta` to whatever is stored (or to `start_value` when the
//! attribute does not exist yet).

use crate::AttributeValue;
use serde::{Deserialize, Serialize};

/// Increment applied by the store on every update when none is configured.
pub const DEFAULT_DELTA: i64 = 1;

/// Value a counter starts from when none is configured.
pub const DEFAULT_START_VALUE: i64 = 0;

/// Delta and start value of an atomic counter attribute.
///
/// Both fields are fixed at schema-build time. In a declarative schema either
/// field may be omitted and falls back to the defaults:
/// `atomic_counter = { delta = -5, start_value = 15 }` or `atomic_counter = {}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    delta: i64,
    start_value: i64,
}

impl CounterConfig {
    /// `delta = 1`, `start_value = 0`.
    pub const DEFAULT: Self = Self::new(DEFAULT_DELTA, DEFAULT_START_VALUE);

    /// Creates a counter configuration. Either value may be negative or zero.
    pub const fn new(delta: i64, start_value: i64) -> Self {
        Self { delta, start_value }
    }

    pub const fn delta(&self) -> i64 {
        self.delta
    }

    pub const fn start_value(&self) -> i64 {
        self.start_value
    }

    /// The start value in wire form, as injected into unconditional writes.
    pub fn start_attribute_value(&self) -> AttributeValue {
        AttributeValue::number(self.start_value)
    }

    /// The value the store's native increment produces from `current`.
    ///
    /// A missing attribute counts as `start_value`. Returns `None` on overflow.
    #[must_use]
    pub fn next_value(&self, current: Option<i64>) -> Option<i64> {
        current.unwrap_or(self.start_value).checked_add(self.delta)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
