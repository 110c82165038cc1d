//! Deterministic product generation from seed definitions.
//!
//! This module provides the core generation function that produces
//! reproducible product catalogues from a seed registry. The same seed value
//! always produces identical output.

use std::collections::BTreeMap;

use fake::Fake;
use fake::faker::company::raw::{BsAdj, BsNoun};
use fake::faker::lorem::raw::Sentence;
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use crate::error::GenerationError;
use crate::registry::{CatalogueRegistry, SeedDefinition};
use crate::seed::{ExampleProductSeed, ExampleVariantSeed};
use crate::validation::{PRODUCT_NAME_MAX, is_valid_product_name, sanitize_product_name};

/// Maximum number of attempts to generate a valid product name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Minimum generated price in cents.
const PRICE_CENTS_MIN: i64 = 299;

/// Maximum generated price in cents.
const PRICE_CENTS_MAX: i64 = 149_999;

/// Maximum generated stock level.
const STOCK_MAX: u32 = 200;

/// Probability of assigning a brand (70%).
const BRAND_PROBABILITY_NUMERATOR: u32 = 7;

/// Probability denominator for brand assignment.
const BRAND_PROBABILITY_DENOMINATOR: u32 = 10;

/// Probability of assigning a rating (80%).
const RATING_PROBABILITY_NUMERATOR: u32 = 4;

/// Probability denominator for rating assignment.
const RATING_PROBABILITY_DENOMINATOR: u32 = 5;

/// Probability of a product carrying variants (25%).
const VARIANT_PROBABILITY_NUMERATOR: u32 = 1;

/// Probability denominator for variant assignment.
const VARIANT_PROBABILITY_DENOMINATOR: u32 = 4;

/// Minimum rating in half-star steps (2.0 stars).
const RATING_HALVES_MIN: i64 = 4;

/// Maximum rating in half-star steps (5.0 stars).
const RATING_HALVES_MAX: i64 = 10;

/// Maximum stock for a single variant.
const VARIANT_STOCK_MAX: u32 = 15;

/// Colour option values offered by variant-bearing products.
const VARIANT_COLOURS: [&str; 4] = ["Black", "White", "Blue", "Red"];

/// Size option values offered by variant-bearing products.
const VARIANT_SIZES: [&str; 3] = ["S", "M", "L"];

/// Generates example products from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG, ensuring
/// identical output for the same seed definition. The generated products
/// have:
///
/// - Sequential ids starting from 1
/// - Valid product names matching catalogue constraints
/// - A category from the registry vocabulary
/// - Two-decimal prices within a realistic range
/// - A brand for ~70% of products (when the registry lists brands)
/// - A half-star rating for ~80% of products
/// - Colour/size variants for ~25% of products
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Product name generation fails after maximum retries
/// - The registry has no categories (required for product generation)
///
/// # Example
///
/// ```
/// use example_data::{CatalogueRegistry, generate_example_products};
///
/// let json = r#"{
///     "version": 1,
///     "categories": ["Electronics"],
///     "brands": ["Acme"],
///     "seeds": [{"name": "test", "seed": 42, "productCount": 3}]
/// }"#;
///
/// let registry = CatalogueRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let products = generate_example_products(&registry, seed_def).expect("generated");
///
/// assert_eq!(products.len(), 3);
/// // Same seed produces identical products
/// let products2 = generate_example_products(&registry, seed_def).expect("generated");
/// assert_eq!(products, products2);
/// ```
pub fn generate_example_products(
    registry: &CatalogueRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleProductSeed>, GenerationError> {
    if registry.categories().is_empty() {
        return Err(GenerationError::NoCategories);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut products = Vec::with_capacity(seed_def.product_count());

    for index in 0..seed_def.product_count() {
        let id = i64::try_from(index).unwrap_or(i64::MAX - 1).saturating_add(1);
        let product = generate_single_product(&mut rng, registry, id)?;
        products.push(product);
    }

    Ok(products)
}

/// Generates a single product with the provided RNG.
fn generate_single_product(
    rng: &mut ChaCha8Rng,
    registry: &CatalogueRegistry,
    id: i64,
) -> Result<ExampleProductSeed, GenerationError> {
    let name = generate_product_name(rng)?;
    let description: String = Sentence(EN, 4..9).fake_with_rng(rng);

    let category = registry
        .categories()
        .choose(rng)
        .cloned()
        .ok_or(GenerationError::NoCategories)?;

    let price = Decimal::new(rng.random_range(PRICE_CENTS_MIN..=PRICE_CENTS_MAX), 2);
    let stock = rng.random_range(0..=STOCK_MAX);
    let image = format!("https://img.example.invalid/products/{id}.jpg");

    let brand = if rng.random_ratio(BRAND_PROBABILITY_NUMERATOR, BRAND_PROBABILITY_DENOMINATOR) {
        registry.brands().choose(rng).cloned()
    } else {
        None
    };

    let rating =
        if rng.random_ratio(RATING_PROBABILITY_NUMERATOR, RATING_PROBABILITY_DENOMINATOR) {
            let halves = rng.random_range(RATING_HALVES_MIN..=RATING_HALVES_MAX);
            Some(Decimal::new(halves.saturating_mul(5), 1))
        } else {
            None
        };

    let variants =
        if rng.random_ratio(VARIANT_PROBABILITY_NUMERATOR, VARIANT_PROBABILITY_DENOMINATOR) {
            generate_variants(rng, id, price, &image)
        } else {
            Vec::new()
        };

    Ok(ExampleProductSeed {
        id,
        name,
        description,
        price,
        image,
        category,
        stock,
        brand,
        rating,
        variants,
    })
}

/// Generates a valid product name using the provided RNG.
///
/// Retries up to `MAX_NAME_ATTEMPTS` times if the generated name fails
/// validation. Names are built from business-speak adjective/noun pairs,
/// title-cased, sanitised to remove invalid characters, and truncated if
/// they exceed the maximum length.
fn generate_product_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let adjective: String = BsAdj(EN).fake_with_rng(rng);
        let noun: String = BsNoun(EN).fake_with_rng(rng);

        let candidate = title_case(&format!("{adjective} {noun}"));
        let sanitized = sanitize_product_name(&candidate);
        let truncated: String = sanitized.chars().take(PRODUCT_NAME_MAX).collect();

        if is_valid_product_name(&truncated) {
            return Ok(truncated);
        }
    }

    Err(GenerationError::ProductNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Generates a deterministic colour/size variant grid for a product.
///
/// Two colours and two sizes are drawn from fixed vocabularies, giving four
/// variants. The second colour carries a 10% price markup so catalogues
/// exercise variant-specific pricing; stock levels vary per variant and may
/// be zero.
fn generate_variants(
    rng: &mut ChaCha8Rng,
    product_id: i64,
    base_price: Decimal,
    image: &str,
) -> Vec<ExampleVariantSeed> {
    let mut colours = VARIANT_COLOURS.to_vec();
    colours.shuffle(rng);
    let mut sizes = VARIANT_SIZES.to_vec();
    sizes.shuffle(rng);

    let premium_price = (base_price * Decimal::new(11, 1)).round_dp(2);

    let mut variants = Vec::new();
    let mut sequence = 0_u32;
    for (colour_index, colour) in colours.iter().take(2).enumerate() {
        for size in sizes.iter().take(2) {
            sequence += 1;
            let price = if colour_index == 0 {
                base_price
            } else {
                premium_price
            };
            let mut options = BTreeMap::new();
            options.insert("color".to_owned(), (*colour).to_owned());
            options.insert("size".to_owned(), (*size).to_owned());
            variants.push(ExampleVariantSeed {
                id: format!("{product_id}-{sequence}"),
                options,
                price,
                stock: rng.random_range(0..=VARIANT_STOCK_MAX),
                image: image.to_owned(),
            });
        }
    }

    variants
}

/// Upper-cases the first character of each whitespace-separated word.
fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
