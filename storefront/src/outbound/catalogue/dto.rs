//! Wire representation of catalogue payloads.
//!
//! The catalogue collaborator serves loosely shaped JSON: brand, rating,
//! category, and variants are all optional, and historic records have
//! omitted description or image. Decoding is tolerant of absent optional
//! fields (they stay absent in the domain) but strict about the fields the
//! engines rely on: a payload with a missing or invalid id, name, or price
//! is rejected as a whole.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::product::{Price, Product, ProductId, Variant, VariantId};

/// Highest rating the catalogue can report.
const RATING_MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDto {
    id: i64,
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    stock: u32,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    variants: Vec<VariantDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantDto {
    id: String,
    #[serde(default)]
    options: BTreeMap<String, String>,
    price: f64,
    #[serde(default)]
    stock: u32,
    #[serde(default)]
    image: String,
}

impl ProductDto {
    pub(crate) fn into_domain(self) -> Result<Product, String> {
        let id = ProductId::new(self.id);
        let price = Price::from_f64(self.price)
            .map_err(|err| format!("product {id} has an invalid price: {err}"))?;

        let variants = self
            .variants
            .into_iter()
            .map(|variant| variant.into_domain(id, &self.image))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price,
            image: self.image,
            category: self.category,
            stock: self.stock,
            brand: self.brand,
            rating: self.rating.and_then(decode_rating),
            variants,
        })
    }
}

impl VariantDto {
    fn into_domain(self, product_id: ProductId, product_image: &str) -> Result<Variant, String> {
        let price = Price::from_f64(self.price).map_err(|err| {
            format!("variant {} of product {product_id} has an invalid price: {err}", self.id)
        })?;
        let image = if self.image.is_empty() {
            product_image.to_owned()
        } else {
            self.image
        };

        Ok(Variant {
            id: VariantId::new(self.id),
            options: self.options,
            price,
            stock: self.stock,
            image,
        })
    }
}

/// Map a raw rating to the domain, dropping values outside `[0, 5]` or
/// otherwise unusable rather than failing the whole payload.
fn decode_rating(raw: f64) -> Option<Decimal> {
    if !raw.is_finite() {
        return None;
    }
    let rating = Decimal::from_f64_retain(raw)?.round_dp(1);
    if rating.is_sign_negative() || rating > RATING_MAX {
        return None;
    }
    Some(rating)
}
