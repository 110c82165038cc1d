//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for catalogue registry parsing
//! and product generation, following the project's error handling conventions
//! with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing, querying, or updating a catalogue
/// registry.
///
/// These errors cover file I/O, JSON parsing, schema validation, and seed
/// lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry file could not be written.
    #[error("failed to write registry file at '{path}': {message}")]
    WriteError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the write failure.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no category names.
    #[error("registry contains no category names")]
    EmptyCategories,

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },

    /// A seed with the given name already exists in the registry.
    #[error("seed '{name}' already exists in registry")]
    DuplicateSeedName {
        /// The colliding seed name.
        name: String,
    },
}

/// Errors that can occur during product generation.
///
/// These errors indicate failures in the generation process itself, such as
/// inability to produce valid product names or missing registry data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid product name after maximum retries.
    #[error("failed to generate valid product name after {max_attempts} attempts")]
    ProductNameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The registry contains no category names for selection.
    #[error("registry contains no category names for selection")]
    NoCategories,
}
