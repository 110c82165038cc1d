//! Domain primitives, engines, and ports.
//!
//! Purpose: define the strongly typed storefront core: catalogue snapshot,
//! filter/sort engine, cart and wishlist engines, and the ports they talk
//! through. Types are immutable where the session contract allows it, and
//! each module documents its invariants and serialisation contracts in
//! Rustdoc.

pub mod cart;
pub mod catalogue;
pub mod events;
pub mod filter;
pub mod ports;
pub mod product;
pub mod recently_viewed;
pub mod records;
pub mod variants;
pub mod wishlist;

pub use self::cart::{AddOutcome, Cart, CartLineItem, CartService, QuantityOutcome};
pub use self::catalogue::Catalogue;
pub use self::events::StorefrontEvent;
pub use self::filter::{
    BrowseView, CategoryGroup, FilterSpec, PriceRange, SortKey, browse, filter_and_sort,
    group_by_category,
};
pub use self::product::{
    ItemKey, ItemSnapshot, Price, PriceError, Product, ProductId, StockLevel, Variant, VariantId,
};
pub use self::recently_viewed::{RecentlyViewed, RecentlyViewedService};
pub use self::wishlist::{Wishlist, WishlistService};
