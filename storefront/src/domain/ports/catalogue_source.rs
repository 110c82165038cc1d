//! Catalogue read collaborator port.
//!
//! The catalogue is served by an external HTTP collaborator and fetched
//! unfiltered; all filtering is client-side. Adapters map their transport
//! failures into the semantic taxonomy here so the session can distinguish
//! retryable outages from permanent failures when surfacing its error state.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{Product, ProductId};

/// Errors surfaced by catalogue source adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueSourceError {
    /// Connection-level failure reaching the collaborator.
    #[error("catalogue transport failure: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
    /// The request timed out.
    #[error("catalogue request timed out: {message}")]
    Timeout {
        /// Description of the failure.
        message: String,
    },
    /// The collaborator rejected the request.
    #[error("catalogue rejected the request: {message}")]
    InvalidRequest {
        /// Description of the rejection.
        message: String,
    },
    /// The requested product does not exist.
    #[error("product {id} not found in catalogue")]
    NotFound {
        /// Identifier that was requested.
        id: ProductId,
    },
    /// The payload could not be decoded into product records.
    #[error("catalogue payload could not be decoded: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },
}

impl CatalogueSourceError {
    /// Helper for connection-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for rejected requests.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// True for transient failures worth retrying (outages and timeouts);
    /// false for rejections, missing products, and malformed payloads.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Read-only port onto the external catalogue collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Fetch the full, unfiltered catalogue.
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogueSourceError>;

    /// Fetch a single product by id.
    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogueSourceError>;
}
