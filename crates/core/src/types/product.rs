//! Normalized product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product, normalized from the catalog API response.
///
/// Used both for the product shown on a detail page and for each of its
/// similar products, and copied into cart entries as their display payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Brand name.
    pub brand: String,
    /// Plain text description.
    pub description: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Average review rating.
    pub rating: f64,
    /// Stock availability label (e.g. "In Stock").
    pub availability: String,
    /// Number of reviews.
    pub total_reviews: u32,
}
