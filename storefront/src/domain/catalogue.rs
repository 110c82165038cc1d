//! Read-only catalogue snapshot and facet derivation.

use crate::domain::product::{Product, ProductId, Variant, VariantId};

/// An immutable snapshot of the product catalogue.
///
/// The snapshot is obtained once per session from the catalogue collaborator
/// and never mutated afterwards; every derived view (filtering, grouping,
/// facets) recomputes from the same records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    products: Vec<Product>,
}

impl Catalogue {
    /// Build a snapshot from fetched product records, preserving source
    /// order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the snapshot holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a variant across all products.
    #[must_use]
    pub fn find_by_variant(&self, id: &VariantId) -> Option<(&Product, &Variant)> {
        self.products
            .iter()
            .find_map(|product| product.variant(id).map(|variant| (product, variant)))
    }

    /// Distinct category labels in first-appearance order.
    ///
    /// Labels are compared case-insensitively after trimming; the first
    /// spelling seen is the one reported. Products without a category do not
    /// contribute a label.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        distinct_labels(self.products.iter().filter_map(|p| p.category.as_deref()))
    }

    /// Distinct brand names in first-appearance order.
    ///
    /// Same normalisation rules as [`Catalogue::categories`].
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        distinct_labels(self.products.iter().filter_map(|p| p.brand.as_deref()))
    }
}

/// Collect trimmed labels, deduplicated case-insensitively, keeping the
/// first spelling seen.
fn distinct_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();
    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        result.push(trimmed.to_owned());
    }
    result
}
