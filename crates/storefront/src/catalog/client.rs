//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP. Responses are not cached: every fetch sends one
//! request carrying the caller's token, so a revoked token is always seen.

use std::sync::Arc;

use nxt_trendz_core::ProductId;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};
use url::Url;

use super::conversions::convert_details;
use super::types::RawProductDetails;
use super::{CatalogError, ProductDetails, ProductSource};
use crate::config::CatalogConfig;

/// Longest body excerpt written to the log for failed responses.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// URL of the product details resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be joined onto the base URL.
    pub fn product_url(&self, id: ProductId) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(&format!("products/{id}"))?)
    }

    /// Get a product and its similar products.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a 404, `Unauthorized` for a 401, and an error
    /// for any other failed request or unparseable body.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn get_product(
        &self,
        id: ProductId,
        token: &SecretString,
    ) -> Result<ProductDetails, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.product_url(id)?)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => return Err(CatalogError::NotFound(id)),
            StatusCode::UNAUTHORIZED => return Err(CatalogError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(1);
                return Err(CatalogError::RateLimited(retry_after));
            }
            _ => {}
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::UnexpectedStatus(status.as_u16()));
        }

        let raw: RawProductDetails = serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })?;

        let details = convert_details(raw);
        debug!(related = details.related.len(), "Product fetched");

        Ok(details)
    }
}

impl ProductSource for CatalogClient {
    async fn fetch_product(
        &self,
        id: ProductId,
        token: &SecretString,
    ) -> Result<ProductDetails, CatalogError> {
        self.get_product(id, token).await
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(base: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_product_url() {
        let client = CatalogClient::new(&config("https://apis.example.com/")).unwrap();
        assert_eq!(
            client.product_url(ProductId::new(16)).unwrap().as_str(),
            "https://apis.example.com/products/16"
        );
    }

    #[test]
    fn test_product_url_keeps_base_path() {
        let client = CatalogClient::new(&config("https://example.com/api/v1/")).unwrap();
        assert_eq!(
            client.product_url(ProductId::new(2)).unwrap().as_str(),
            "https://example.com/api/v1/products/2"
        );
    }

    #[test]
    fn test_excerpt_truncates() {
        let body = "x".repeat(LOG_BODY_LIMIT + 10);
        assert_eq!(excerpt(&body).len(), LOG_BODY_LIMIT);
        assert_eq!(excerpt("short"), "short");
    }
}
