//! Catalog API client.
//!
//! # Architecture
//!
//! - `GET {base}/products/{id}` with a bearer token returns a product and
//!   its similar products
//! - Raw API records are normalized into [`ProductRecord`]s by a single
//!   conversion function used for both the product and its similar items
//! - Nothing is cached; each fetch is one request with the caller's token
//!
//! The page state machine depends on the [`ProductSource`] trait rather than
//! the HTTP client, so it can be driven by scripted sources in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use nxt_trendz_storefront::catalog::{CatalogClient, ProductSource};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let details = client.fetch_product(ProductId::new(16), &token).await?;
//! println!("{} ({} similar)", details.product.title, details.related.len());
//! ```

mod client;
mod conversions;
pub mod types;

use std::future::Future;

use nxt_trendz_core::{ProductId, ProductRecord};
use secrecy::SecretString;
use thiserror::Error;

pub use client::CatalogClient;
pub use conversions::{convert_details, convert_product};

/// Errors that can occur when fetching from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid product JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Token missing, expired or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),
}

/// A product together with its similar products, both normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    /// The requested product.
    pub product: ProductRecord,
    /// Similar products, in API order.
    pub related: Vec<ProductRecord>,
}

/// Something that can load product details.
pub trait ProductSource: Send + Sync {
    /// Fetch the product `id` and its similar products.
    fn fetch_product(
        &self,
        id: ProductId,
        token: &SecretString,
    ) -> impl Future<Output = Result<ProductDetails, CatalogError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(123));
        assert_eq!(err.to_string(), "Product not found: 123");

        let err = CatalogError::UnexpectedStatus(503);
        assert_eq!(err.to_string(), "Unexpected status: 503");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
