//! Headless storefront client library.
//!
//! Implements the browsing core of a conventional e-commerce storefront
//! (catalogue snapshot, faceted filter/sort engine, cart, wishlist, and
//! recently-viewed engines) against two external collaborators: a
//! read-only catalogue HTTP API and a durable local state directory.
//!
//! The [`session::StorefrontSession`] facade is the intended entry point;
//! the `storefront` binary drives it from the command line.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod session;

pub use session::{CatalogueState, SessionError, StorefrontSession};
