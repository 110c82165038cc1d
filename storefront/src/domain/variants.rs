//! Variant option selection helpers.
//!
//! A variant-bearing product offers options across dimensions (colour, size,
//! storage). Shoppers pick one value per dimension; a line item can only be
//! created once the selection resolves to exactly one variant. These helpers
//! are pure functions over a product's variant list.

use std::collections::BTreeMap;

use crate::domain::product::Variant;

/// A shopper's partial or complete option selection.
pub type OptionSelection = BTreeMap<String, String>;

/// Option values offered per dimension, in first-appearance order.
///
/// Dimensions follow the order they first appear across the variant list,
/// as do the values within each dimension.
#[must_use]
pub fn options_by_dimension(variants: &[Variant]) -> Vec<(String, Vec<String>)> {
    let mut dimensions: Vec<(String, Vec<String>)> = Vec::new();

    for variant in variants {
        for (dimension, value) in &variant.options {
            let entry = dimensions.iter_mut().find(|(name, _)| name == dimension);
            match entry {
                Some((_, values)) => {
                    if !values.contains(value) {
                        values.push(value.clone());
                    }
                }
                None => dimensions.push((dimension.clone(), vec![value.clone()])),
            }
        }
    }

    dimensions
}

/// True when choosing `value` for `dimension` is compatible with the rest of
/// the current selection.
///
/// The dimension being tested is excluded from the compatibility check so a
/// shopper can always switch their existing choice within a dimension.
#[must_use]
pub fn is_option_available(
    variants: &[Variant],
    selection: &OptionSelection,
    dimension: &str,
    value: &str,
) -> bool {
    variants.iter().any(|variant| {
        variant.options.get(dimension).map(String::as_str) == Some(value)
            && selection
                .iter()
                .filter(|(selected_dimension, _)| selected_dimension.as_str() != dimension)
                .all(|(selected_dimension, selected_value)| {
                    variant.options.get(selected_dimension) == Some(selected_value)
                })
    })
}

/// Resolve a complete selection to its unique variant.
///
/// Returns `None` while the selection is incomplete (fewer dimensions chosen
/// than the product offers) or when it matches no variant. A selection that
/// covers every dimension matches at most one variant.
#[must_use]
pub fn resolve_variant<'a>(
    variants: &'a [Variant],
    selection: &OptionSelection,
) -> Option<&'a Variant> {
    let dimension_count = options_by_dimension(variants).len();
    if selection.len() < dimension_count {
        return None;
    }

    let mut matches = variants.iter().filter(|variant| {
        selection
            .iter()
            .all(|(dimension, value)| variant.options.get(dimension) == Some(value))
    });

    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    //! Covers option narrowing over a small variant grid.
    use rstest::rstest;

    use super::*;
    use crate::domain::product::{Price, VariantId};

    fn variant(id: &str, pairs: &[(&str, &str)], stock: u32) -> Variant {
        Variant {
            id: VariantId::new(id),
            options: pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            price: Price::from_f64(10.0).expect("valid price"),
            stock,
            image: String::new(),
        }
    }

    fn wardrobe() -> Vec<Variant> {
        vec![
            variant("1-1", &[("color", "Black"), ("size", "S")], 10),
            variant("1-2", &[("color", "Black"), ("size", "M")], 5),
            variant("1-3", &[("color", "Blue"), ("size", "S")], 7),
        ]
    }

    fn selection(pairs: &[(&str, &str)]) -> OptionSelection {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[rstest]
    fn collects_dimensions_and_values_in_first_appearance_order() {
        let dimensions = options_by_dimension(&wardrobe());

        let names: Vec<&str> = dimensions.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["color", "size"]);

        let colours = &dimensions.first().expect("colour dimension").1;
        assert_eq!(colours, &vec!["Black".to_owned(), "Blue".to_owned()]);
        let sizes = &dimensions.get(1).expect("size dimension").1;
        assert_eq!(sizes, &vec!["S".to_owned(), "M".to_owned()]);
    }

    #[rstest]
    fn no_variants_means_no_dimensions() {
        assert!(options_by_dimension(&[]).is_empty());
    }

    #[rstest]
    fn availability_narrows_with_the_rest_of_the_selection() {
        let variants = wardrobe();
        let blue_selected = selection(&[("color", "Blue")]);

        // Blue only exists in size S.
        assert!(is_option_available(&variants, &blue_selected, "size", "S"));
        assert!(!is_option_available(&variants, &blue_selected, "size", "M"));
    }

    #[rstest]
    fn availability_ignores_the_dimension_being_switched() {
        let variants = wardrobe();
        let black_m = selection(&[("color", "Black"), ("size", "M")]);

        // Switching colour ignores the current colour choice but honours the
        // selected size, so Blue (size S only) is unavailable.
        assert!(is_option_available(&variants, &black_m, "color", "Black"));
        assert!(!is_option_available(&variants, &black_m, "color", "Blue"));
    }

    #[rstest]
    fn unknown_values_are_never_available() {
        let variants = wardrobe();
        assert!(!is_option_available(
            &variants,
            &OptionSelection::new(),
            "color",
            "Green"
        ));
    }

    #[rstest]
    fn complete_selection_resolves_to_a_unique_variant() {
        let variants = wardrobe();
        let resolved = resolve_variant(&variants, &selection(&[("color", "Black"), ("size", "M")]));

        assert_eq!(resolved.map(|v| v.id.as_str()), Some("1-2"));
    }

    #[rstest]
    fn incomplete_selection_does_not_resolve() {
        let variants = wardrobe();
        assert!(resolve_variant(&variants, &selection(&[("color", "Black")])).is_none());
    }

    #[rstest]
    fn impossible_selection_does_not_resolve() {
        let variants = wardrobe();
        assert!(
            resolve_variant(&variants, &selection(&[("color", "Blue"), ("size", "M")])).is_none()
        );
    }
}
