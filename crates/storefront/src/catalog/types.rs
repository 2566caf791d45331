//! Raw catalog API response shapes.
//!
//! These mirror the JSON returned by the API (snake_case, optional fields
//! defaulted) and are only used as input to the conversion functions.

use nxt_trendz_core::{Price, ProductId};
use serde::Deserialize;

/// A product as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub price: Price,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub total_reviews: u32,
}

/// Body of `GET /products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProductDetails {
    #[serde(flatten)]
    pub product: RawProduct,
    #[serde(default)]
    pub similar_products: Vec<RawProduct>,
}
