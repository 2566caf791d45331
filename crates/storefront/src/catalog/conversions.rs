//! Raw API to domain conversions.

use nxt_trendz_core::ProductRecord;

use super::ProductDetails;
use super::types::{RawProduct, RawProductDetails};

/// Normalize a raw API product.
#[must_use]
pub fn convert_product(raw: RawProduct) -> ProductRecord {
    ProductRecord {
        id: raw.id,
        title: raw.title,
        brand: raw.brand,
        description: raw.description,
        image_url: raw.image_url,
        price: raw.price,
        rating: raw.rating,
        availability: raw.availability,
        total_reviews: raw.total_reviews,
    }
}

/// Normalize a product details response, similar products included.
#[must_use]
pub fn convert_details(raw: RawProductDetails) -> ProductDetails {
    ProductDetails {
        product: convert_product(raw.product),
        related: raw
            .similar_products
            .into_iter()
            .map(convert_product)
            .collect(),
    }
}
