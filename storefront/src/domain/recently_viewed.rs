//! Recently-viewed history and engine.
//!
//! Viewing a product moves it to the front of a bounded
//! most-recently-viewed list. The list deduplicates by identity key and
//! shares the cart/wishlist persistence contract.

use std::sync::Arc;

use crate::domain::product::{ItemKey, ItemSnapshot, Product};
use crate::domain::ports::{StateKey, StateStore};
use crate::domain::records;

/// Maximum number of recently-viewed entries retained.
pub const RECENTLY_VIEWED_CAPACITY: usize = 10;

/// Bounded most-recently-viewed-first product history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentlyViewed {
    entries: Vec<ItemSnapshot>,
}

impl RecentlyViewed {
    /// Rebuild the history from persisted entries.
    #[must_use]
    pub fn from_entries(entries: Vec<ItemSnapshot>) -> Self {
        Self { entries }
    }

    /// Entries, most recently viewed first.
    #[must_use]
    pub fn entries(&self) -> &[ItemSnapshot] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a view: any existing entry for the key moves to the front,
    /// and the list is truncated to [`RECENTLY_VIEWED_CAPACITY`].
    pub fn record(&mut self, snapshot: ItemSnapshot) {
        self.entries.retain(|entry| entry.key != snapshot.key);
        self.entries.insert(0, snapshot);
        self.entries.truncate(RECENTLY_VIEWED_CAPACITY);
    }

    /// Forget one entry by identity key.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        self.entries.len() != before
    }

    /// Empty the history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Recently-viewed engine with the shared write-through persistence and
/// reset-on-corruption recovery contract.
pub struct RecentlyViewedService<S: StateStore> {
    history: RecentlyViewed,
    store: Arc<S>,
}

impl<S: StateStore> RecentlyViewedService<S> {
    /// Load the persisted history, recovering to empty on any failure.
    #[must_use]
    pub fn open(store: Arc<S>) -> Self {
        let entries = records::load_or_reset(
            store.as_ref(),
            StateKey::RecentlyViewed,
            |entries: &[ItemSnapshot]| entries.len() <= RECENTLY_VIEWED_CAPACITY,
        );
        Self {
            history: RecentlyViewed::from_entries(entries),
            store,
        }
    }

    /// Read access to the underlying history.
    #[must_use]
    pub fn recently_viewed(&self) -> &RecentlyViewed {
        &self.history
    }

    /// Record a product view.
    pub fn record_product(&mut self, product: &Product) {
        self.history.record(ItemSnapshot::of_product(product));
        self.persist();
    }

    /// Forget one entry.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let removed = self.history.remove(key);
        self.persist();
        removed
    }

    /// Empty the history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.persist();
    }

    fn persist(&self) {
        records::persist_collection(
            self.store.as_ref(),
            StateKey::RecentlyViewed,
            self.history.entries(),
        );
    }
}
