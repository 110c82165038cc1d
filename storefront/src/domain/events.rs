//! Session events emitted to presentation-layer observers.
//!
//! These events stay transport agnostic so any presentation surface (CLI,
//! UI shell) can subscribe for badge counts and error banners without
//! reaching into engine state.

use crate::domain::product::Price;

/// Events published by the storefront session after state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum StorefrontEvent {
    /// The catalogue finished loading.
    CatalogueLoaded {
        /// Number of products in the snapshot.
        product_count: usize,
    },
    /// The catalogue could not be loaded; the session is in a visible,
    /// retryable error state rather than an indefinite loading state.
    CatalogueUnavailable {
        /// Human-readable description of the failure.
        message: String,
        /// Whether retrying is worthwhile.
        retryable: bool,
    },
    /// The cart changed; carries the new badge count and total.
    CartChanged {
        /// Sum of quantities across all lines.
        item_count: u32,
        /// Sum of line totals.
        total: Price,
    },
    /// The wishlist changed; carries the new entry count.
    WishlistChanged {
        /// Number of saved entries.
        entry_count: usize,
    },
}
