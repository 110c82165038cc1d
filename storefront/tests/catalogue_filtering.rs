//! Filter/sort engine integration tests over generated catalogues.
//!
//! Uses the example-data crate to generate a realistic catalogue (optional
//! brands and ratings, variant grids, repeated categories) and checks the
//! engine's spec-level properties against it.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use pagination::PageNumber;
use rust_decimal::Decimal;
use storefront::domain::catalogue::Catalogue;
use storefront::domain::filter::{
    BrowseView, FilterSpec, GROUP_PREVIEW_LIMIT, PAGE_SIZE, PriceRange, SortKey, browse,
    filter_and_sort, group_by_category,
};
use storefront::domain::product::{Price, Product};

const REGISTRY_JSON: &str = r#"{
    "version": 1,
    "categories": ["Electronics", "Fashion", "Home", "Books", "Sports"],
    "brands": ["Acme", "Northwind", "Fabrikam"],
    "seeds": [{"name": "fixture", "seed": 2026, "productCount": 60}]
}"#;

/// Generate a deterministic catalogue and hand it to the storefront through
/// its wire shape, exactly as the HTTP collaborator would serve it.
fn fixture_catalogue() -> Catalogue {
    let registry =
        example_data::CatalogueRegistry::from_json(REGISTRY_JSON).expect("valid registry");
    let seed = registry.find_seed("fixture").expect("seed exists");
    let generated =
        example_data::generate_example_products(&registry, seed).expect("generation succeeds");

    let json = serde_json::to_string(&generated).expect("serialise catalogue");
    let products: Vec<Product> = serde_json::from_str(&json).expect("deserialise catalogue");
    Catalogue::new(products)
}

#[test]
fn generated_catalogues_cross_the_wire_shape_intact() {
    let catalogue = fixture_catalogue();

    assert_eq!(catalogue.len(), 60);
    assert!(catalogue.products().iter().any(|p| p.brand.is_some()));
    assert!(catalogue.products().iter().any(|p| p.rating.is_some()));
    assert!(catalogue.products().iter().any(|p| !p.variants.is_empty()));
}

#[test]
fn filtering_is_deterministic_across_runs() {
    let catalogue = fixture_catalogue();
    let spec = FilterSpec {
        min_rating: Decimal::new(3, 0),
        sort: SortKey::PriceAsc,
        ..FilterSpec::default()
    };

    assert_eq!(
        filter_and_sort(&catalogue, &spec),
        filter_and_sort(&catalogue, &spec)
    );
}

#[test]
fn price_sort_is_a_total_order_over_the_matched_set() {
    let catalogue = fixture_catalogue();
    let spec = FilterSpec {
        sort: SortKey::PriceAsc,
        price_range: PriceRange::new(
            Price::ZERO,
            Price::from_f64(2000.0).expect("valid price"),
        ),
        ..FilterSpec::default()
    };

    let sorted = filter_and_sort(&catalogue, &spec);
    assert!(!sorted.is_empty());
    assert!(
        sorted.windows(2).all(|pair| match pair {
            [a, b] => a.price <= b.price,
            _ => true,
        }),
        "prices should be non-decreasing"
    );
}

#[test]
fn name_sort_orders_case_insensitively() {
    let catalogue = fixture_catalogue();
    let spec = FilterSpec {
        sort: SortKey::NameAsc,
        ..FilterSpec::default()
    };

    let sorted = filter_and_sort(&catalogue, &spec);
    let names: Vec<String> = sorted.iter().map(|p| p.name.to_lowercase()).collect();
    let mut expected = names.clone();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn popular_sort_preserves_source_order() {
    let catalogue = fixture_catalogue();
    let matched = filter_and_sort(&catalogue, &FilterSpec::default());

    let ids: Vec<i64> = matched.iter().map(|p| p.id.get()).collect();
    let source_ids: Vec<i64> = catalogue
        .products()
        .iter()
        .filter(|p| FilterSpec::default().matches(p))
        .map(|p| p.id.get())
        .collect();
    assert_eq!(ids, source_ids);
}

#[test]
fn category_facets_cover_every_matched_product() {
    let catalogue = fixture_catalogue();
    let facets = catalogue.categories();

    for product in catalogue.products() {
        let category = product.category.as_deref().expect("generated categories");
        assert!(
            facets.iter().any(|facet| facet == category),
            "category {category} missing from facets"
        );
    }
}

#[test]
fn each_facet_narrows_to_exactly_its_category() {
    let catalogue = fixture_catalogue();

    for facet in catalogue.categories() {
        let spec = FilterSpec {
            categories: vec![facet.clone()],
            ..FilterSpec::default()
        };
        let matched = filter_and_sort(&catalogue, &spec);
        assert!(!matched.is_empty(), "facet {facet} should match something");
        assert!(
            matched
                .iter()
                .all(|p| p.category.as_deref() == Some(facet.as_str()))
        );
    }
}

#[test]
fn grouped_view_caps_previews_and_accounts_for_every_product() {
    let catalogue = fixture_catalogue();
    let matched = filter_and_sort(&catalogue, &FilterSpec::default());
    let groups = group_by_category(&matched);

    assert!(groups.iter().all(|g| g.preview.len() <= GROUP_PREVIEW_LIMIT));
    assert!(groups.iter().all(|g| g.preview.len() <= g.total));
    let grouped_total: usize = groups.iter().map(|g| g.total).sum();
    assert_eq!(grouped_total, matched.len());
}

#[test]
fn walking_every_page_recovers_the_full_matched_list() {
    let catalogue = fixture_catalogue();
    let facet = catalogue
        .categories()
        .into_iter()
        .next()
        .expect("at least one category");
    let spec = FilterSpec {
        categories: vec![facet],
        ..FilterSpec::default()
    };
    let matched = filter_and_sort(&catalogue, &spec);

    let mut walked = Vec::new();
    let mut page_number = 1_u32;
    loop {
        let page = PageNumber::new(page_number).expect("valid page");
        let BrowseView::Paged(view) = browse(&catalogue, &spec, page) else {
            panic!("category restriction should paginate");
        };
        assert_eq!(view.total_items, matched.len());
        assert_eq!(view.page_count, matched.len().div_ceil(PAGE_SIZE) as u32);
        if view.items.is_empty() {
            break;
        }
        walked.extend(view.items);
        page_number += 1;
    }

    assert_eq!(walked, matched);
}

#[test]
fn brand_restriction_only_matches_branded_products() {
    let catalogue = fixture_catalogue();
    let spec = FilterSpec {
        brands: vec!["acme".to_owned()],
        ..FilterSpec::default()
    };

    let matched = filter_and_sort(&catalogue, &spec);
    assert!(!matched.is_empty(), "fixture should contain Acme products");
    assert!(
        matched
            .iter()
            .all(|p| p.brand.as_deref().is_some_and(|b| b.eq_ignore_ascii_case("acme")))
    );
}

#[test]
fn search_narrows_by_substring_across_fields() {
    let catalogue = fixture_catalogue();
    let sample = catalogue
        .products()
        .first()
        .expect("non-empty catalogue")
        .clone();
    let needle: String = sample.name.chars().take(4).collect();

    let spec = FilterSpec {
        search_query: needle.to_uppercase(),
        ..FilterSpec::default()
    };
    let matched = filter_and_sort(&catalogue, &spec);

    assert!(matched.iter().any(|p| p.id == sample.id));
    let folded = needle.to_lowercase();
    assert!(matched.iter().all(|p| {
        p.name.to_lowercase().contains(&folded)
            || p.description.to_lowercase().contains(&folded)
            || p.category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&folded))
    }));
}
