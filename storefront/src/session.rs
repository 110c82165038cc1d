//! Storefront session facade.
//!
//! The session is the single state-owning service object the presentation
//! layer talks to: it loads the catalogue once per session, owns the cart,
//! wishlist, and recently-viewed engines, holds the current browse state,
//! and notifies registered observers after every state change. Presentation
//! code never mutates engine state directly.
//!
//! A failed catalogue fetch is a first-class, retryable state; the session
//! never leaves the presentation layer on an indefinite loading screen.

use std::sync::Arc;

use pagination::PageNumber;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::cart::{AddOutcome, Cart, CartService, QuantityOutcome};
use crate::domain::catalogue::Catalogue;
use crate::domain::events::StorefrontEvent;
use crate::domain::filter::{BrowseView, FilterSpec, browse};
use crate::domain::ports::{CatalogueSource, CatalogueSourceError, StateStore};
use crate::domain::product::{ItemKey, ItemSnapshot, Product, ProductId, VariantId};
use crate::domain::recently_viewed::{RecentlyViewed, RecentlyViewedService};
use crate::domain::wishlist::{Wishlist, WishlistService};

/// Catalogue lifecycle within a session.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueState {
    /// No fetch has completed yet.
    Loading,
    /// The catalogue snapshot is available.
    Ready(Catalogue),
    /// The fetch failed; retry via [`StorefrontSession::load_catalogue`].
    Failed {
        /// The failure being surfaced to the shopper.
        error: CatalogueSourceError,
    },
}

impl CatalogueState {
    /// The snapshot, when ready.
    #[must_use]
    pub fn catalogue(&self) -> Option<&Catalogue> {
        match self {
            Self::Ready(catalogue) => Some(catalogue),
            Self::Loading | Self::Failed { .. } => None,
        }
    }
}

/// Errors surfaced to the presentation layer by session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The catalogue has not finished loading.
    #[error("catalogue is still loading")]
    CatalogueNotReady,
    /// The catalogue failed to load; the operation needs a successful retry
    /// first.
    #[error("catalogue is unavailable: {source}")]
    CatalogueUnavailable {
        /// The underlying fetch failure.
        #[source]
        source: CatalogueSourceError,
    },
    /// No catalogue product carries the requested id.
    #[error("product {id} is not in the catalogue")]
    UnknownProduct {
        /// The requested product id.
        id: ProductId,
    },
    /// No catalogue product carries the requested variant.
    #[error("variant '{id}' is not in the catalogue")]
    UnknownVariant {
        /// The requested variant id.
        id: VariantId,
    },
}

/// Current filter specification plus the shopper's position within it.
///
/// Changing any filter criterion resets the page to 1; only explicit page
/// navigation moves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    spec: FilterSpec,
    page: PageNumber,
}

impl BrowseState {
    /// The active filter specification.
    #[must_use]
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// The current 1-based page.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Replace the filter criteria, resetting the page to 1.
    pub fn set_spec(&mut self, spec: FilterSpec) {
        if self.spec != spec {
            self.page = PageNumber::FIRST;
        }
        self.spec = spec;
    }

    /// Navigate to a page within the current criteria.
    pub fn set_page(&mut self, page: PageNumber) {
        self.page = page;
    }
}

type Subscriber = Box<dyn FnMut(&StorefrontEvent)>;

/// The state-owning storefront service object.
pub struct StorefrontSession<C: CatalogueSource, S: StateStore> {
    source: C,
    catalogue_state: CatalogueState,
    browse_state: BrowseState,
    cart: CartService<S>,
    wishlist: WishlistService<S>,
    recently_viewed: RecentlyViewedService<S>,
    subscribers: Vec<Subscriber>,
}

impl<C: CatalogueSource, S: StateStore> StorefrontSession<C, S> {
    /// Open a session: engines restore their persisted collections (with
    /// reset-on-corruption recovery) and the catalogue starts loading.
    #[must_use]
    pub fn new(source: C, store: Arc<S>) -> Self {
        Self {
            source,
            catalogue_state: CatalogueState::Loading,
            browse_state: BrowseState::default(),
            cart: CartService::open(Arc::clone(&store)),
            wishlist: WishlistService::open(Arc::clone(&store)),
            recently_viewed: RecentlyViewedService::open(store),
            subscribers: Vec::new(),
        }
    }

    /// Register an observer for session events.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&StorefrontEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn emit(&mut self, event: &StorefrontEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Fetch the catalogue from the collaborator.
    ///
    /// On success the session becomes ready; on failure it enters a visible
    /// `Failed` state carrying the error, and calling this again retries.
    pub async fn load_catalogue(&mut self) {
        match self.source.fetch_all().await {
            Ok(products) => {
                let catalogue = Catalogue::new(products);
                let product_count = catalogue.len();
                info!(product_count, "catalogue loaded");
                self.catalogue_state = CatalogueState::Ready(catalogue);
                self.emit(&StorefrontEvent::CatalogueLoaded { product_count });
            }
            Err(error) => {
                warn!(%error, retryable = error.is_retryable(), "catalogue fetch failed");
                let event = StorefrontEvent::CatalogueUnavailable {
                    message: error.to_string(),
                    retryable: error.is_retryable(),
                };
                self.catalogue_state = CatalogueState::Failed { error };
                self.emit(&event);
            }
        }
    }

    /// Current catalogue lifecycle state.
    #[must_use]
    pub fn catalogue_state(&self) -> &CatalogueState {
        &self.catalogue_state
    }

    /// The loaded catalogue, or the session error explaining why there is
    /// none.
    pub fn catalogue(&self) -> Result<&Catalogue, SessionError> {
        match &self.catalogue_state {
            CatalogueState::Ready(catalogue) => Ok(catalogue),
            CatalogueState::Loading => Err(SessionError::CatalogueNotReady),
            CatalogueState::Failed { error } => Err(SessionError::CatalogueUnavailable {
                source: error.clone(),
            }),
        }
    }

    /// The current browse state.
    #[must_use]
    pub fn browse_state(&self) -> &BrowseState {
        &self.browse_state
    }

    /// Replace the filter criteria, resetting the page to 1.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.browse_state.set_spec(spec);
    }

    /// Navigate to a page within the current criteria.
    pub fn set_page(&mut self, page: PageNumber) {
        self.browse_state.set_page(page);
    }

    /// Derive the display view for the current criteria and page.
    pub fn browse_view(&self) -> Result<BrowseView, SessionError> {
        let catalogue = self.catalogue()?;
        Ok(browse(
            catalogue,
            self.browse_state.spec(),
            self.browse_state.page(),
        ))
    }

    /// Fetch a product for display, recording it as recently viewed.
    pub fn view_product(&mut self, id: ProductId) -> Result<Product, SessionError> {
        let product = self
            .catalogue()?
            .find(id)
            .cloned()
            .ok_or(SessionError::UnknownProduct { id })?;
        self.recently_viewed.record_product(&product);
        Ok(product)
    }

    /// Read access to the cart collection.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// Read access to the wishlist collection.
    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        self.wishlist.wishlist()
    }

    /// Read access to the recently-viewed history.
    #[must_use]
    pub fn recently_viewed(&self) -> &RecentlyViewed {
        self.recently_viewed.recently_viewed()
    }

    /// Add one unit of the item addressed by `key` to the cart.
    pub fn add_to_cart(&mut self, key: &ItemKey) -> Result<AddOutcome, SessionError> {
        let snapshot = self.resolve(key)?;
        let outcome = self.cart.add_item(snapshot);
        self.emit_cart_changed();
        Ok(outcome)
    }

    /// Remove a cart line; absent keys are a no-op.
    pub fn remove_from_cart(&mut self, key: &ItemKey) -> bool {
        let removed = self.cart.remove(key);
        self.emit_cart_changed();
        removed
    }

    /// Set a cart line's quantity; zero removes the line.
    pub fn set_cart_quantity(&mut self, key: &ItemKey, quantity: u32) -> QuantityOutcome {
        let outcome = self.cart.set_quantity(key, quantity);
        self.emit_cart_changed();
        outcome
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.emit_cart_changed();
    }

    /// Save the item addressed by `key` to the wishlist. Idempotent.
    pub fn add_to_wishlist(&mut self, key: &ItemKey) -> Result<bool, SessionError> {
        let snapshot = self.resolve(key)?;
        let added = self.wishlist.add_item(snapshot);
        self.emit_wishlist_changed();
        Ok(added)
    }

    /// Remove a wishlist entry; absent keys are a no-op.
    pub fn remove_from_wishlist(&mut self, key: &ItemKey) -> bool {
        let removed = self.wishlist.remove(key);
        self.emit_wishlist_changed();
        removed
    }

    /// Empty the wishlist.
    pub fn clear_wishlist(&mut self) {
        self.wishlist.clear();
        self.emit_wishlist_changed();
    }

    /// Empty the recently-viewed history.
    pub fn clear_recently_viewed(&mut self) {
        self.recently_viewed.clear();
    }

    fn resolve(&self, key: &ItemKey) -> Result<ItemSnapshot, SessionError> {
        let catalogue = self.catalogue()?;
        match key {
            ItemKey::Product(id) => catalogue
                .find(*id)
                .map(ItemSnapshot::of_product)
                .ok_or(SessionError::UnknownProduct { id: *id }),
            ItemKey::Variant(id) => catalogue
                .find_by_variant(id)
                .map(|(product, variant)| ItemSnapshot::of_variant(product, variant))
                .ok_or_else(|| SessionError::UnknownVariant { id: id.clone() }),
        }
    }

    fn emit_cart_changed(&mut self) {
        let event = StorefrontEvent::CartChanged {
            item_count: self.cart.cart().item_count(),
            total: self.cart.cart().total(),
        };
        self.emit(&event);
    }

    fn emit_wishlist_changed(&mut self) {
        let event = StorefrontEvent::WishlistChanged {
            entry_count: self.wishlist.wishlist().len(),
        };
        self.emit(&event);
    }
}
