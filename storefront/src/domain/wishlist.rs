//! Wishlist aggregate and engine.
//!
//! The wishlist mirrors the cart's contract minus quantity handling: at
//! most one entry per identity key, with an idempotent add. The presentation
//! layer calls [`Wishlist::contains`] pervasively to toggle icon state.

use std::sync::Arc;

use crate::domain::product::{ItemKey, ItemSnapshot, Product, Variant};
use crate::domain::ports::{StateKey, StateStore};
use crate::domain::records;

/// The wishlist collection and its uniqueness invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    entries: Vec<ItemSnapshot>,
}

impl Wishlist {
    /// Rebuild a wishlist from persisted entries.
    #[must_use]
    pub fn from_entries(entries: Vec<ItemSnapshot>) -> Self {
        Self { entries }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ItemSnapshot] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the wishlist holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when an entry with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.iter().any(|entry| &entry.key == key)
    }

    /// Add an entry. Adding an already-present identity key is a no-op, not
    /// a duplicate; returns whether the entry was inserted.
    pub fn add(&mut self, snapshot: ItemSnapshot) -> bool {
        if self.contains(&snapshot.key) {
            return false;
        }
        self.entries.push(snapshot);
        true
    }

    /// Delete the entry with `key`. Absent keys are a no-op, not an error.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        self.entries.len() != before
    }

    /// Empty the entire collection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Wishlist engine: owns the collection and writes it through to durable
/// storage after every mutation, with the same recovery contract as the
/// cart engine.
pub struct WishlistService<S: StateStore> {
    wishlist: Wishlist,
    store: Arc<S>,
}

impl<S: StateStore> WishlistService<S> {
    /// Load the persisted wishlist, recovering to empty on any failure.
    #[must_use]
    pub fn open(store: Arc<S>) -> Self {
        let entries =
            records::load_or_reset(store.as_ref(), StateKey::Wishlist, |entries: &[ItemSnapshot]| {
                has_unique_keys(entries)
            });
        Self {
            wishlist: Wishlist::from_entries(entries),
            store,
        }
    }

    /// Read access to the underlying collection.
    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Save an already-captured item snapshot. Idempotent per identity key.
    pub fn add_item(&mut self, item: ItemSnapshot) -> bool {
        let added = self.wishlist.add(item);
        self.persist();
        added
    }

    /// Save a base product. Idempotent per identity key.
    pub fn add_product(&mut self, product: &Product) -> bool {
        let added = self.wishlist.add(ItemSnapshot::of_product(product));
        self.persist();
        added
    }

    /// Save a selected variant. Idempotent per identity key.
    pub fn add_variant(&mut self, product: &Product, variant: &Variant) -> bool {
        let added = self.wishlist.add(ItemSnapshot::of_variant(product, variant));
        self.persist();
        added
    }

    /// Remove an entry by identity key.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let removed = self.wishlist.remove(key);
        self.persist();
        removed
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.wishlist.clear();
        self.persist();
    }

    fn persist(&self) {
        records::persist_collection(self.store.as_ref(), StateKey::Wishlist, self.wishlist.entries());
    }
}

/// Uniqueness invariant for persisted wishlist records.
fn has_unique_keys(entries: &[ItemSnapshot]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(index, entry)| !entries.iter().take(index).any(|other| other.key == entry.key))
}
