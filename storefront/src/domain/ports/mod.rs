//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the catalogue HTTP collaborator and the durable state store). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

pub mod catalogue_source;
pub mod state_store;

pub use catalogue_source::{CatalogueSource, CatalogueSourceError};
pub use state_store::{StateKey, StateStore, StateStoreError};

#[cfg(test)]
pub use catalogue_source::MockCatalogueSource;
