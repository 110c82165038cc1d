//! Generated product seed types.
//!
//! This module defines the output types from product generation. These types
//! are independent of the storefront's domain types to avoid circular
//! dependencies; they serialise to the same JSON shape the catalogue API
//! serves, so generated catalogues can be used directly as fixtures.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A generated product variant.
///
/// Variants carry their own identifier, price, and stock, plus the option
/// values (colour, size, storage) that distinguish them from their siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleVariantSeed {
    /// Variant identifier, unique within the catalogue.
    pub id: String,
    /// Option dimension name to selected value.
    pub options: BTreeMap<String, String>,
    /// Variant price, which may differ from the base product price.
    pub price: Decimal,
    /// Units in stock for this variant.
    pub stock: u32,
    /// Image URL for this variant.
    pub image: String,
}

/// A generated example product record.
///
/// Serialises to the catalogue API's product shape. Optional fields are
/// omitted when absent so fixtures exercise the storefront's
/// missing-field handling.
///
/// # Example
///
/// ```
/// use example_data::ExampleProductSeed;
/// use rust_decimal::Decimal;
///
/// let product = ExampleProductSeed {
///     id: 1,
///     name: "Quantified Widget".to_owned(),
///     description: "A widget of unusual quality.".to_owned(),
///     price: Decimal::new(1999, 2),
///     image: "https://example.invalid/widget.jpg".to_owned(),
///     category: "Electronics".to_owned(),
///     stock: 25,
///     brand: None,
///     rating: None,
///     variants: Vec::new(),
/// };
///
/// assert_eq!(product.price.to_string(), "19.99");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleProductSeed {
    /// Unique catalogue identifier.
    pub id: i64,
    /// Product display name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Base price with two-decimal monetary semantics.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Category label.
    pub category: String,
    /// Units in stock.
    pub stock: u32,
    /// Optional brand name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Optional average rating in `[0, 5]`, in half-star steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
    /// Product variants; empty for single-variant products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ExampleVariantSeed>,
}
