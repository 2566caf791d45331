//! Integration tests for Nxt Trendz.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nxt-trendz-integration-tests
//! ```
//!
//! No external services are needed: the catalog API is replaced by a
//! `wiremock` server and local storage lives in a temporary directory.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client against a mock catalog API
//! - `cart_persistence` - File-backed cart across restarts
//! - `product_details_flow` - Storefront end to end

#![allow(clippy::expect_used)]

use nxt_trendz_storefront::config::StorefrontConfig;
use nxt_trendz_storefront::state::DefaultStorefront;
use nxt_trendz_storefront::storage::{CookieJar, FileStore};
use secrecy::SecretString;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

/// A mock catalog API plus a scratch data directory.
pub struct TestContext {
    pub server: MockServer,
    pub data_dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Start a mock server and point a fresh configuration at it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::tempdir().expect("create temp dir");

        let api_url = server.uri();
        let data_path = data_dir.path().display().to_string();
        let config = StorefrontConfig::from_lookup(|key| match key {
            "CATALOG_API_URL" => Some(api_url.clone()),
            "NXT_DATA_DIR" => Some(data_path.clone()),
            _ => None,
        })
        .expect("valid test config");

        Self {
            server,
            data_dir,
            config,
        }
    }

    /// Build a file-backed storefront over this context.
    pub fn storefront(&self) -> DefaultStorefront {
        DefaultStorefront::from_config(self.config.clone()).expect("storefront")
    }

    /// Store `token` the way the login flow does.
    pub fn login(&self, token: &str) {
        CookieJar::new(FileStore::new(self.config.cookies_path()))
            .store_token(&self.config.token_key, &SecretString::from(token.to_string()))
            .expect("store token");
    }

    /// Remove the stored token.
    pub fn logout(&self) {
        CookieJar::new(FileStore::new(self.config.cookies_path()))
            .clear_token(&self.config.token_key)
            .expect("clear token");
    }
}

/// A raw catalog record as the API sends it.
#[must_use]
pub fn raw_product(id: i64, title: &str, price: i64) -> Value {
    json!({
        "id": id,
        "image_url": format!("https://assets.ccbp.in/products/{id}.png"),
        "title": title,
        "style": "Casual",
        "price": price,
        "description": format!("{title} description"),
        "brand": "Nxt",
        "total_reviews": 12,
        "rating": 4.2,
        "availability": "In Stock"
    })
}

/// A product details response with the given similar products.
#[must_use]
pub fn details_body(id: i64, title: &str, price: i64, similar: &[Value]) -> Value {
    let mut body = raw_product(id, title, price);
    body["similar_products"] = Value::Array(similar.to_vec());
    body
}
