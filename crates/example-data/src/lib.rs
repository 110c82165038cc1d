//! Deterministic example product catalogue generation for demonstration
//! purposes.
//!
//! This crate provides tools for generating believable, reproducible product
//! catalogues from a JSON seed registry. It is designed to be independent of
//! the storefront's domain types to avoid circular dependencies; generated
//! products serialise to the same JSON shape the catalogue API serves.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading catalogue registries from JSON files
//! - Deterministic product generation using named seeds
//! - Product name validation matching catalogue constraints
//! - Configurable category and brand vocabularies
//! - Atomic registry updates via the seed CLI
//!
//! # Example
//!
//! ```
//! use example_data::{CatalogueRegistry, generate_example_products};
//!
//! let json = r#"{
//!     "version": 1,
//!     "categories": ["Electronics", "Fashion"],
//!     "brands": ["Acme"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "productCount": 3}]
//! }"#;
//!
//! let registry = CatalogueRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let products = generate_example_products(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(products.len(), 3);
//! ```

mod atomic_io;
mod error;
mod generator;
mod registry;
mod seed;
pub mod seed_registry_cli;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_products;
pub use registry::{CatalogueRegistry, SeedDefinition};
pub use seed::{ExampleProductSeed, ExampleVariantSeed};
pub use validation::{PRODUCT_NAME_MAX, PRODUCT_NAME_MIN, is_valid_product_name};
