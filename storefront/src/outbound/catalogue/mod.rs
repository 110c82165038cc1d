//! Catalogue collaborator adapters.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_REQUEST_TIMEOUT, HttpCatalogueSource};
