//! Catalogue registry types and JSON parsing.
//!
//! This module defines the catalogue registry structure that holds named seed
//! definitions plus the category and brand vocabularies generated products
//! draw from. The registry is loaded from JSON and provides deterministic
//! seed lookups.

use std::fs;
use std::path::Path;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};

use crate::atomic_io::write_atomic;
use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A catalogue registry containing named seeds and generation vocabularies.
///
/// The registry is loaded from a JSON file and provides access to seed
/// definitions plus the category and brand names that generated products can
/// reference.
///
/// # Example
///
/// ```
/// use example_data::CatalogueRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "categories": ["Electronics"],
///     "brands": [],
///     "seeds": [{"name": "test", "seed": 42, "productCount": 5}]
/// }"#;
///
/// let registry = CatalogueRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueRegistry {
    version: u32,
    categories: Vec<String>,
    brands: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl CatalogueRegistry {
    /// Parses a catalogue registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The categories array is empty
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawCatalogueRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalogue registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawCatalogueRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        // Product generation draws every category from the registry, so an
        // empty vocabulary can never produce a valid product.
        if raw.categories.is_empty() {
            return Err(RegistryError::EmptyCategories);
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                product_count: s.product_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            categories: raw.categories,
            brands: raw.brands,
            seeds,
        })
    }

    /// Serialises the registry back to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ParseError`] if serialisation fails, which
    /// only happens when the registry holds non-serialisable data.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let raw = RawCatalogueRegistry {
            version: self.version,
            categories: self.categories.clone(),
            brands: self.brands.clone(),
            seeds: self
                .seeds
                .iter()
                .map(|s| RawSeedDefinition {
                    name: s.name.clone(),
                    seed: s.seed,
                    product_count: s.product_count,
                })
                .collect(),
        };
        serde_json::to_string_pretty(&raw).map_err(|e| RegistryError::ParseError {
            message: e.to_string(),
        })
    }

    /// Writes the registry to a JSON file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the parent directory cannot be opened or
    /// the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), RegistryError> {
        let json = self.to_json()?;
        // A bare file name has an empty parent; treat it as the current directory.
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(file_name) = path.file_name() else {
            return Err(RegistryError::WriteError {
                path: path.to_path_buf(),
                message: "registry path must name a file".to_owned(),
            });
        };
        let utf8_name = file_name.to_str().ok_or_else(|| RegistryError::WriteError {
            path: path.to_path_buf(),
            message: "registry file name must be valid UTF-8".to_owned(),
        })?;
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
                RegistryError::WriteError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;

        write_atomic(&dir, Utf8Path::new(utf8_name), &json)
    }

    /// Returns a copy of the registry with `seed_def` appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSeedName`] if a seed with the same
    /// name already exists.
    pub fn append_seed(&self, seed_def: SeedDefinition) -> Result<Self, RegistryError> {
        if self.seeds.iter().any(|s| s.name == seed_def.name) {
            return Err(RegistryError::DuplicateSeedName {
                name: seed_def.name,
            });
        }
        let mut updated = self.clone();
        updated.seeds.push(seed_def);
        Ok(updated)
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the category vocabulary.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the brand vocabulary.
    #[must_use]
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed definition for deterministic product generation.
///
/// Each seed has a unique name, an RNG seed value, and a product count that
/// determines how many products to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    product_count: usize,
}

impl SeedDefinition {
    /// Creates a seed definition.
    #[must_use]
    pub const fn new(name: String, seed: u64, product_count: usize) -> Self {
        Self {
            name,
            seed,
            product_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of products to generate.
    #[must_use]
    pub const fn product_count(&self) -> usize {
        self.product_count
    }
}

/// Raw JSON representation for serialisation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogueRegistry {
    version: u32,
    categories: Vec<String>,
    brands: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    product_count: usize,
}
