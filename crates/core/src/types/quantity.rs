//! Item quantities.
//!
//! A quantity is never zero: a cart entry that would drop to zero is removed
//! instead, and the quantity selector on the product page floors at one.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Normalize a caller-requested quantity.
    ///
    /// Missing or zero requests count as a single item.
    #[must_use]
    pub fn requested(value: Option<u32>) -> Self {
        value.and_then(Self::new).unwrap_or(Self::ONE)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }

    /// One more item.
    #[must_use]
    pub const fn increment(self) -> Self {
        self.saturating_add(Self::ONE)
    }

    /// One fewer item, or `None` if this was the last one.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
