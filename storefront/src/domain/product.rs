//! Product and variant domain types.
//!
//! Catalogue records are immutable once loaded for the duration of a session.
//! Prices carry two-decimal monetary semantics; optional fields (brand,
//! rating) stay optional all the way through so filtering can treat their
//! absence deliberately rather than panicking.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Units at or below which a stock level is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// Unique identifier of a base catalogue product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw catalogue identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one options combination of a product.
///
/// Variant identifiers are catalogue-assigned strings (for example `"5-2"`)
/// and are distinct from the base product id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Wrap a raw variant identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity key addressing a cart, wishlist, or recently-viewed entry.
///
/// For variant-bearing products the identity is the variant id, not the base
/// product id: two variants of the same product are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ItemKey {
    /// A base product without a selected variant.
    Product(ProductId),
    /// A specific options combination of a product.
    Variant(VariantId),
}

/// Error returned when parsing an empty identity key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identity key must not be empty")]
pub struct ParseItemKeyError;

impl FromStr for ItemKey {
    type Err = ParseItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseItemKeyError);
        }
        trimmed.parse::<i64>().map_or_else(
            |_| Ok(Self::Variant(VariantId::new(trimmed))),
            |id| Ok(Self::Product(ProductId::new(id))),
        )
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(id) => write!(f, "{id}"),
            Self::Variant(id) => write!(f, "{id}"),
        }
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ItemKey {
    type Error = ParseItemKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Errors raised when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Monetary amounts must not be negative.
    #[error("price must not be negative: {value}")]
    Negative {
        /// The rejected amount.
        value: Decimal,
    },
    /// Floating point input was NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative monetary amount quantised to two decimal places.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Construct a price from a decimal amount, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts.
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative { value });
        }
        Ok(Self(value.round_dp(2)))
    }

    /// Construct a price from a floating point amount, as received from the
    /// catalogue API, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] for NaN or infinite input and
    /// [`PriceError::Negative`] for negative input.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        let decimal = Decimal::from_f64_retain(value).ok_or(PriceError::NotFinite)?;
        Self::new(decimal)
    }

    /// Return the underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Sum of two prices.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.amount()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A specific options combination of a product, with its own price and stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Catalogue-assigned variant identifier.
    pub id: VariantId,
    /// Option dimension name to selected value (for example colour, size).
    pub options: BTreeMap<String, String>,
    /// Variant price, which may differ from the base product price.
    pub price: Price,
    /// Units in stock for this variant.
    pub stock: u32,
    /// Image URL for this variant.
    pub image: String,
}

/// An immutable catalogue product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalogue identifier.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Base price.
    pub price: Price,
    /// Image URL; not validated by the core.
    pub image: String,
    /// Free-text category label, absent for uncategorised products.
    pub category: Option<String>,
    /// Units in stock; the ceiling for any single cart line.
    pub stock: u32,
    /// Optional brand name.
    pub brand: Option<String>,
    /// Optional average rating in `[0, 5]`.
    pub rating: Option<Decimal>,
    /// Product variants; empty for single-variant products.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Look up one of this product's variants by id.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// True when the product offers selectable variants.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// Snapshot of the product (or variant) fields an owned entry carries.
///
/// Cart lines, wishlist entries, and recently-viewed entries all hold a
/// snapshot rather than a live catalogue reference, so a line's price stays
/// the price it was added at even if the catalogue moves. For variants, the
/// snapshot takes the variant's identity, price, stock, and image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    /// Identity key addressing this entry.
    pub key: ItemKey,
    /// Base product id, kept for catalogue lookups even for variants.
    pub product_id: ProductId,
    /// Variant id when a variant was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    /// Display name.
    pub name: String,
    /// Price at the time of capture.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Stock ceiling at the time of capture.
    pub stock: u32,
    /// Selected option values for variants; empty otherwise.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ItemSnapshot {
    /// Capture a base product.
    #[must_use]
    pub fn of_product(product: &Product) -> Self {
        Self {
            key: ItemKey::Product(product.id),
            product_id: product.id,
            variant_id: None,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            stock: product.stock,
            options: BTreeMap::new(),
        }
    }

    /// Capture a selected variant of a product.
    #[must_use]
    pub fn of_variant(product: &Product, variant: &Variant) -> Self {
        Self {
            key: ItemKey::Variant(variant.id.clone()),
            product_id: product.id,
            variant_id: Some(variant.id.clone()),
            name: product.name.clone(),
            price: variant.price,
            image: variant.image.clone(),
            stock: variant.stock,
            options: variant.options.clone(),
        }
    }
}

/// Presentation-level stock signal derived from raw unit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// No units available.
    OutOfStock,
    /// At most [`LOW_STOCK_THRESHOLD`] units remain.
    Low(u32),
    /// Comfortably in stock.
    InStock(u32),
}

impl StockLevel {
    /// Classify a raw unit count.
    #[must_use]
    pub const fn for_units(units: u32) -> Self {
        if units == 0 {
            Self::OutOfStock
        } else if units <= LOW_STOCK_THRESHOLD {
            Self::Low(units)
        } else {
            Self::InStock(units)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Covers price arithmetic and identity key parsing.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn price_rounds_to_two_places() {
        let price = Price::new(Decimal::new(99_999, 4)).expect("valid price"); // 9.9999
        assert_eq!(price.amount(), Decimal::new(1000, 2)); // 10.00
    }

    #[rstest]
    fn price_from_f64_is_exact_for_monetary_values() {
        let price = Price::from_f64(9.99).expect("valid price");
        assert_eq!(price.amount(), Decimal::new(999, 2));
    }

    #[rstest]
    fn price_rejects_negative_amounts() {
        let result = Price::new(Decimal::new(-1, 2));
        assert!(matches!(result, Err(PriceError::Negative { .. })));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn price_rejects_non_finite_input(#[case] value: f64) {
        assert_eq!(Price::from_f64(value), Err(PriceError::NotFinite));
    }

    #[rstest]
    fn line_totals_are_exact() {
        let price = Price::from_f64(9.99).expect("valid price");
        assert_eq!(price.times(2).amount(), Decimal::new(1998, 2));
    }

    #[rstest]
    fn price_displays_with_two_places() {
        let price = Price::from_f64(5.0).expect("valid price");
        assert_eq!(price.to_string(), "5.00");
    }

    #[rstest]
    #[case("5", ItemKey::Product(ProductId::new(5)))]
    #[case(" 12 ", ItemKey::Product(ProductId::new(12)))]
    #[case("5-2", ItemKey::Variant(VariantId::new("5-2")))]
    #[case("sku-blue-m", ItemKey::Variant(VariantId::new("sku-blue-m")))]
    fn item_key_parses_products_and_variants(#[case] input: &str, #[case] expected: ItemKey) {
        let parsed: ItemKey = input.parse().expect("key should parse");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn item_key_rejects_blank_input(#[case] input: &str) {
        let result: Result<ItemKey, _> = input.parse();
        assert_eq!(result, Err(ParseItemKeyError));
    }

    #[rstest]
    fn item_key_display_round_trips() {
        for key in [
            ItemKey::Product(ProductId::new(7)),
            ItemKey::Variant(VariantId::new("7-3")),
        ] {
            let rendered = key.to_string();
            let parsed: ItemKey = rendered.parse().expect("round-trip parse");
            assert_eq!(parsed, key);
        }
    }

    #[rstest]
    #[case(0, StockLevel::OutOfStock)]
    #[case(1, StockLevel::Low(1))]
    #[case(3, StockLevel::Low(3))]
    #[case(4, StockLevel::InStock(4))]
    fn stock_levels_classify_unit_counts(#[case] units: u32, #[case] expected: StockLevel) {
        assert_eq!(StockLevel::for_units(units), expected);
    }
}
