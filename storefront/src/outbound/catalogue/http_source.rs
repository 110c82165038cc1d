//! Reqwest-backed catalogue source adapter.
//!
//! This adapter owns transport details only: request construction, timeout
//! and HTTP error mapping, and JSON decoding into domain products. The full
//! catalogue endpoint is unfiltered and unpaginated; every filter criterion
//! is applied client-side by the domain engines.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::ProductDto;
use crate::domain::ports::{CatalogueSource, CatalogueSourceError};
use crate::domain::product::{Product, ProductId};

/// Default request timeout applied when configuration does not override it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalogue source adapter performing HTTP GET requests against one base
/// URL.
pub struct HttpCatalogueSource {
    client: Client,
    base_url: Url,
}

impl HttpCatalogueSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogueSourceError> {
        self.base_url.join(path).map_err(|err| {
            CatalogueSourceError::invalid_request(format!("cannot build endpoint '{path}': {err}"))
        })
    }

    async fn get_bytes(
        &self,
        url: Url,
        looked_up: Option<ProductId>,
    ) -> Result<Vec<u8>, CatalogueSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), looked_up));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogueSource for HttpCatalogueSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogueSourceError> {
        let url = self.endpoint("api/products")?;
        let body = self.get_bytes(url, None).await?;
        parse_products(&body)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogueSourceError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        let body = self.get_bytes(url, Some(id)).await?;
        parse_product(&body)
    }
}

fn parse_products(body: &[u8]) -> Result<Vec<Product>, CatalogueSourceError> {
    let decoded: Vec<ProductDto> = serde_json::from_slice(body).map_err(|error| {
        CatalogueSourceError::decode(format!("invalid catalogue JSON payload: {error}"))
    })?;
    decoded
        .into_iter()
        .map(|dto| dto.into_domain().map_err(CatalogueSourceError::decode))
        .collect()
}

fn parse_product(body: &[u8]) -> Result<Product, CatalogueSourceError> {
    let decoded: ProductDto = serde_json::from_slice(body).map_err(|error| {
        CatalogueSourceError::decode(format!("invalid product JSON payload: {error}"))
    })?;
    decoded.into_domain().map_err(CatalogueSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> CatalogueSourceError {
    if error.is_timeout() {
        CatalogueSourceError::timeout(error.to_string())
    } else {
        CatalogueSourceError::transport(error.to_string())
    }
}

fn map_status_error(
    status: StatusCode,
    body: &[u8],
    looked_up: Option<ProductId>,
) -> CatalogueSourceError {
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = looked_up {
            return CatalogueSourceError::NotFound { id };
        }
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CatalogueSourceError::timeout(message)
        }
        _ if status.is_client_error() => CatalogueSourceError::invalid_request(message),
        _ => CatalogueSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network catalogue mapping helpers.

    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_catalogue_json_into_domain_products() {
        let body = r#"[
            {"id": 1, "name": "Alpha Speaker", "price": 49.99,
             "category": "Electronics", "stock": 12, "brand": "Acme", "rating": 4.5},
            {"id": 2, "name": "Mystery Box", "price": 5.0}
        ]"#;

        let products = parse_products(body.as_bytes()).expect("JSON should decode");
        assert_eq!(products.len(), 2);
        let first = products.first().expect("first product");
        assert_eq!(first.name, "Alpha Speaker");
        assert_eq!(first.brand.as_deref(), Some("Acme"));
        let second = products.get(1).expect("second product");
        assert_eq!(second.category, None);
        assert_eq!(second.rating, None);
    }

    #[test]
    fn rejects_payloads_with_invalid_required_fields() {
        let body = r#"[{"id": 1, "name": "Broken", "price": -2.0}]"#;

        let error = parse_products(body.as_bytes()).expect_err("decode should fail");
        assert!(
            matches!(error, CatalogueSourceError::Decode { .. }),
            "invalid prices should map to Decode errors",
        );
    }

    #[test]
    fn rejects_non_array_catalogue_payloads() {
        let error = parse_products(br#"{"products": []}"#).expect_err("decode should fail");
        assert!(matches!(error, CatalogueSourceError::Decode { .. }));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "InvalidRequest")]
    #[case::too_many_requests(StatusCode::TOO_MANY_REQUESTS, "InvalidRequest")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, "Transport")]
    fn maps_http_statuses_to_expected_domain_errors(
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, b"upstream unavailable", None);
        match expected {
            "Timeout" => {
                assert!(
                    matches!(error, CatalogueSourceError::Timeout { .. }),
                    "timeout statuses should map to Timeout",
                );
            }
            "InvalidRequest" => {
                assert!(
                    matches!(error, CatalogueSourceError::InvalidRequest { .. }),
                    "client statuses should map to InvalidRequest",
                );
            }
            "Transport" => {
                assert!(
                    matches!(error, CatalogueSourceError::Transport { .. }),
                    "other statuses should map to Transport",
                );
            }
            _ => panic!("unsupported test expectation: {expected}"),
        }
    }

    #[test]
    fn not_found_maps_to_the_missing_product_for_detail_lookups() {
        let id = ProductId::new(42);
        let error = map_status_error(StatusCode::NOT_FOUND, b"", Some(id));
        assert_eq!(error, CatalogueSourceError::NotFound { id });

        let listing_error = map_status_error(StatusCode::NOT_FOUND, b"", None);
        assert!(matches!(
            listing_error,
            CatalogueSourceError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn long_error_bodies_are_previewed() {
        let body = "x".repeat(500);
        let error = map_status_error(StatusCode::BAD_REQUEST, body.as_bytes(), None);
        let CatalogueSourceError::InvalidRequest { message } = error else {
            panic!("expected invalid request");
        };
        assert!(message.ends_with("..."));
        assert!(message.len() < 250);
    }
}
