//! Shopping cart aggregate and engine.
//!
//! The cart owns the set of line items a shopper intends to purchase. Line
//! items are addressed by identity key: the variant id when a variant was
//! selected, the base product id otherwise, so two variants of one product
//! are distinct lines.
//!
//! Per-line lifecycle: absent → present(1) on first add; present(n) →
//! present(n+1) on repeated add; present(n) → present(m) on explicit set
//! (m > 0); present → absent on remove, set-to-zero, or clear. No other
//! transitions exist. Quantity is never persisted as zero, and every
//! mutation is clamped to the line's stock ceiling.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::product::{ItemKey, ItemSnapshot, Price, Product, Variant};
use crate::domain::ports::{StateKey, StateStore};
use crate::domain::records;

/// One cart entry: a captured product/variant snapshot plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Captured product or variant fields.
    #[serde(flatten)]
    pub item: ItemSnapshot,
    /// Units of this line; always at least one.
    pub quantity: u32,
}

impl CartLineItem {
    /// Price × quantity for this line, using the captured price.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price.times(self.quantity)
    }
}

/// Result of an add mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created with quantity one.
    Inserted,
    /// An existing line's quantity was incremented.
    Incremented {
        /// Quantity after the increment.
        quantity: u32,
    },
    /// The line is already at its stock ceiling; nothing changed.
    AtStockCeiling {
        /// The unchanged quantity (zero when the item is out of stock).
        quantity: u32,
    },
}

/// Result of a set-quantity mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The quantity was set as requested.
    Updated {
        /// The new quantity.
        quantity: u32,
    },
    /// The request exceeded the stock ceiling and was clamped to it.
    Clamped {
        /// The clamped quantity.
        quantity: u32,
    },
    /// A zero quantity removed the line.
    Removed,
    /// No line with that key exists; nothing changed.
    Absent,
}

/// The cart collection and its quantity invariants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Rebuild a cart from persisted lines.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of line totals, using each line's captured price.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.line_total()))
    }

    /// Find a line by identity key.
    #[must_use]
    pub fn find(&self, key: &ItemKey) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.item.key == key)
    }

    /// Add one unit of the captured item.
    ///
    /// An existing line for the same identity key is incremented, capped at
    /// the line's stock ceiling; otherwise a new line is inserted with
    /// quantity one. Adding an out-of-stock item is a reported no-op.
    pub fn add(&mut self, snapshot: ItemSnapshot) -> AddOutcome {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.item.key == snapshot.key)
        {
            if line.quantity >= line.item.stock {
                return AddOutcome::AtStockCeiling {
                    quantity: line.quantity,
                };
            }
            line.quantity += 1;
            return AddOutcome::Incremented {
                quantity: line.quantity,
            };
        }

        if snapshot.stock == 0 {
            return AddOutcome::AtStockCeiling { quantity: 0 };
        }
        self.items.push(CartLineItem {
            item: snapshot,
            quantity: 1,
        });
        AddOutcome::Inserted
    }

    /// Delete the line with `key`. Absent keys are a no-op, not an error.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.item.key != key);
        self.items.len() != before
    }

    /// Set a line's quantity directly (no increment semantics).
    ///
    /// Zero removes the line entirely; values above the stock ceiling are
    /// clamped to it.
    pub fn set_quantity(&mut self, key: &ItemKey, quantity: u32) -> QuantityOutcome {
        if quantity == 0 {
            return if self.remove(key) {
                QuantityOutcome::Removed
            } else {
                QuantityOutcome::Absent
            };
        }

        let Some(line) = self.items.iter_mut().find(|line| &line.item.key == key) else {
            return QuantityOutcome::Absent;
        };

        if quantity > line.item.stock {
            line.quantity = line.item.stock.max(1);
            return QuantityOutcome::Clamped {
                quantity: line.quantity,
            };
        }
        line.quantity = quantity;
        QuantityOutcome::Updated { quantity }
    }

    /// Empty the entire collection.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Cart engine: owns the collection and writes it through to durable
/// storage after every mutation.
///
/// Initialisation recovers from missing or corrupt storage by falling back
/// to an empty cart; a failure here must never break application startup.
/// Save failures are logged and leave the in-memory state authoritative.
pub struct CartService<S: StateStore> {
    cart: Cart,
    store: Arc<S>,
}

impl<S: StateStore> CartService<S> {
    /// Load the persisted cart, recovering to empty on any failure.
    #[must_use]
    pub fn open(store: Arc<S>) -> Self {
        let items = records::load_or_reset(store.as_ref(), StateKey::Cart, |lines: &[CartLineItem]| {
            lines.iter().all(|line| line.quantity > 0)
        });
        Self {
            cart: Cart::from_items(items),
            store,
        }
    }

    /// Read access to the underlying collection.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of an already-captured item snapshot.
    pub fn add_item(&mut self, item: ItemSnapshot) -> AddOutcome {
        let outcome = self.cart.add(item);
        self.persist();
        outcome
    }

    /// Add one unit of a base product.
    pub fn add_product(&mut self, product: &Product) -> AddOutcome {
        let outcome = self.cart.add(ItemSnapshot::of_product(product));
        self.persist();
        outcome
    }

    /// Add one unit of a selected variant.
    pub fn add_variant(&mut self, product: &Product, variant: &Variant) -> AddOutcome {
        let outcome = self.cart.add(ItemSnapshot::of_variant(product, variant));
        self.persist();
        outcome
    }

    /// Remove a line by identity key.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let removed = self.cart.remove(key);
        self.persist();
        removed
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, key: &ItemKey, quantity: u32) -> QuantityOutcome {
        let outcome = self.cart.set_quantity(key, quantity);
        self.persist();
        outcome
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        records::persist_collection(self.store.as_ref(), StateKey::Cart, self.cart.items());
    }
}
