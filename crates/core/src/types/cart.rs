//! Cart entries and the cart list.
//!
//! The list keeps insertion order and holds at most one entry per product.
//! Every operation here is total: unknown IDs are ignored rather than
//! reported, and quantities can never reach zero.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, ProductRecord, Quantity};

/// One product in the cart together with the quantity to purchase.
///
/// Serialized as the product record's fields plus a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Display payload, copied from the product when it was last added.
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Number of items.
    pub quantity: Quantity,
}

impl CartEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(product: ProductRecord, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// The product ID this entry is keyed by.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Order total and entry count, as shown in the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of every entry's line total.
    pub total: Price,
    /// Number of distinct entries.
    pub item_count: usize,
}

/// Ordered list of cart entries.
///
/// Serialized as a JSON array. Deserializing merges entries that share an
/// ID, so a stored list always comes back with one entry per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct CartList {
    entries: Vec<CartEntry>,
}

impl CartList {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a product, merging into an existing entry for the same ID.
    ///
    /// An existing entry gets the requested quantity added to its own and
    /// its display payload replaced by `product`. A missing or zero
    /// `requested` quantity counts as one.
    pub fn add(&mut self, product: ProductRecord, requested: Option<u32>) {
        self.merge(CartEntry::new(product, Quantity::requested(requested)));
    }

    /// Remove the entry for `id`. Returns whether an entry was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Add one to the quantity of `id`. Returns whether the entry exists.
    pub fn increment(&mut self, id: ProductId) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };
        entry.quantity = entry.quantity.increment();
        true
    }

    /// Take one from the quantity of `id`, removing the entry at one.
    /// Returns whether the entry exists.
    pub fn decrement(&mut self, id: ProductId) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };

        match entry.quantity.decrement() {
            Some(quantity) => entry.quantity = quantity,
            None => {
                self.remove(id);
            }
        }
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up the entry for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order total, recomputed from the entries on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Total and entry count.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total: self.total(),
            item_count: self.len(),
        }
    }

    fn merge(&mut self, incoming: CartEntry) {
        match self.get_mut(incoming.id()) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(incoming.quantity);
                existing.product = incoming.product;
            }
            None => self.entries.push(incoming),
        }
    }
}

impl From<Vec<CartEntry>> for CartList {
    fn from(entries: Vec<CartEntry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            list.merge(entry);
        }
        list
    }
}

impl From<CartList> for Vec<CartEntry> {
    fn from(list: CartList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a CartList {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
