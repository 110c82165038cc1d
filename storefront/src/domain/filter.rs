//! Multi-criteria product filtering, sorting, grouping, and pagination.
//!
//! All predicates are AND-combined; within the category and brand predicates
//! the configured values are OR-combined. The engine is a pure function of a
//! catalogue snapshot and a [`FilterSpec`]: the same inputs always produce
//! the same output, and malformed or missing optional product fields degrade
//! to "does not match" rather than panicking.
//!
//! An empty category or brand set means "no restriction", but a non-empty
//! set never matches a product lacking the relevant field.

use pagination::{Page, PageNumber, PageSize, paginate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::Catalogue;
use crate::domain::product::{Price, Product};

/// Fixed number of products shown per page in single-category mode.
pub const PAGE_SIZE: usize = 8;

/// Maximum products previewed per category group in grouped mode.
pub const GROUP_PREVIEW_LIMIT: usize = 4;

/// Group label for products without a category.
pub const UNCATEGORISED_LABEL: &str = "Uncategorized";

const BROWSE_PAGE_SIZE: PageSize = match PageSize::new(PAGE_SIZE) {
    Ok(size) => size,
    Err(_) => panic!("browse page size must be non-zero"),
};

/// Sort order applied to the matched subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// No reordering; source order is preserved.
    #[default]
    Popular,
    /// Ascending numeric price.
    PriceAsc,
    /// Descending numeric price.
    PriceDesc,
    /// Lexicographic ascending on case-folded name.
    NameAsc,
    /// Lexicographic descending on case-folded name.
    NameDesc,
}

impl SortKey {
    /// Stable wire identifier for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    /// Parse a sort key, degrading unknown values to [`SortKey::Popular`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::Popular,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub min: Price,
    /// Inclusive upper bound.
    pub max: Price,
}

impl PriceRange {
    /// Construct a range from bounds.
    #[must_use]
    pub const fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }

    /// True when `price` lies within the bounds, inclusive.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    /// The storefront's default browse range of 0 to 1000.
    fn default() -> Self {
        Self {
            min: Price::ZERO,
            max: Price::new(Decimal::new(1000, 0)).unwrap_or(Price::ZERO),
        }
    }
}

/// Ephemeral multi-criteria filter specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Free-text query matched against name, description, and category.
    pub search_query: String,
    /// Inclusive price bounds.
    pub price_range: PriceRange,
    /// Category restriction; empty means unrestricted.
    pub categories: Vec<String>,
    /// Brand restriction; empty means unrestricted.
    pub brands: Vec<String>,
    /// Inclusive rating lower bound; zero means unrestricted.
    pub min_rating: Decimal,
    /// Sort order for the matched subset.
    pub sort: SortKey,
}

impl FilterSpec {
    /// True when an explicit category restriction is active.
    #[must_use]
    pub fn has_category_restriction(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Evaluate every predicate against one product.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_brand(product)
            && self.price_range.contains(product.price)
            && self.matches_rating(product)
            && self.matches_search(product)
    }

    /// Strict normalised equality against the category set. A product with a
    /// missing or blank category never matches a non-empty set.
    fn matches_category(&self, product: &Product) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        let Some(product_category) = non_blank(product.category.as_deref()) else {
            return false;
        };
        let folded = normalise(product_category);
        self.categories
            .iter()
            .any(|candidate| normalise(candidate) == folded)
    }

    fn matches_brand(&self, product: &Product) -> bool {
        if self.brands.is_empty() {
            return true;
        }
        let Some(product_brand) = non_blank(product.brand.as_deref()) else {
            return false;
        };
        let folded = normalise(product_brand);
        self.brands
            .iter()
            .any(|candidate| normalise(candidate) == folded)
    }

    /// A product without a rating scores zero against the lower bound.
    fn matches_rating(&self, product: &Product) -> bool {
        product.rating.unwrap_or(Decimal::ZERO) >= self.min_rating
    }

    /// Case-insensitive substring match against name, description, or
    /// category. An empty query matches everything.
    fn matches_search(&self, product: &Product) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
            || product
                .category
                .as_deref()
                .is_some_and(|category| category.to_lowercase().contains(&query))
    }
}

fn normalise(value: &str) -> String {
    value.trim().to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The matched subset of the catalogue, stably sorted by the sort key.
#[must_use]
pub fn filter_and_sort(catalogue: &Catalogue, spec: &FilterSpec) -> Vec<Product> {
    let mut matched: Vec<Product> = catalogue
        .products()
        .iter()
        .filter(|product| spec.matches(product))
        .cloned()
        .collect();

    match spec.sort {
        SortKey::Popular => {}
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAsc => matched.sort_by(|a, b| fold_name(a).cmp(&fold_name(b))),
        SortKey::NameDesc => matched.sort_by(|a, b| fold_name(b).cmp(&fold_name(a))),
    }

    matched
}

fn fold_name(product: &Product) -> String {
    product.name.to_lowercase()
}

/// One category's slice of the grouped browse view.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// Display label for the group.
    pub name: String,
    /// Up to [`GROUP_PREVIEW_LIMIT`] products, in sorted order.
    pub preview: Vec<Product>,
    /// Full matched count for the group's "see more" affordance.
    pub total: usize,
}

/// Group an already-sorted matched list by category for display.
///
/// Groups appear in order of first appearance in the sorted list; products
/// without a category fall into [`UNCATEGORISED_LABEL`]. Each preview is
/// capped while `total` keeps the full per-group count.
#[must_use]
pub fn group_by_category(sorted: &[Product]) -> Vec<CategoryGroup> {
    let mut keys: Vec<String> = Vec::new();
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for product in sorted {
        let label = non_blank(product.category.as_deref()).unwrap_or(UNCATEGORISED_LABEL);
        let folded = normalise(label);

        let position = keys.iter().position(|k| k == &folded);
        let group = match position {
            Some(index) => groups.get_mut(index),
            None => {
                keys.push(folded);
                groups.push(CategoryGroup {
                    name: label.to_owned(),
                    preview: Vec::new(),
                    total: 0,
                });
                groups.last_mut()
            }
        };
        if let Some(group) = group {
            group.total += 1;
            if group.preview.len() < GROUP_PREVIEW_LIMIT {
                group.preview.push(product.clone());
            }
        }
    }

    groups
}

/// A derived browse view over the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseView {
    /// No category restriction: matched products grouped by category.
    Grouped(Vec<CategoryGroup>),
    /// Category restriction active: one fixed-size page of the matched list.
    Paged(Page<Product>),
}

/// Filter, sort, and shape the catalogue for display.
///
/// With no explicit category restriction the matched list is grouped by
/// category; otherwise it is paginated at [`PAGE_SIZE`] items per page.
#[must_use]
pub fn browse(catalogue: &Catalogue, spec: &FilterSpec, page: PageNumber) -> BrowseView {
    let matched = filter_and_sort(catalogue, spec);
    if spec.has_category_restriction() {
        BrowseView::Paged(paginate(&matched, BROWSE_PAGE_SIZE, page))
    } else {
        BrowseView::Grouped(group_by_category(&matched))
    }
}
