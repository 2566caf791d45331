//! CLI command implementations.

pub mod cart;
pub mod product;
pub mod session;

use nxt_trendz_core::ProductId;
use nxt_trendz_storefront::error::AppError;
use nxt_trendz_storefront::product_details::FetchFailure;
use nxt_trendz_storefront::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront could not be assembled.
    #[error(transparent)]
    App(#[from] AppError),

    /// Local storage could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No token, or the API rejected it.
    #[error("Not logged in. Run `nxt-cli login --token <TOKEN>` first")]
    NotLoggedIn,

    /// The product could not be loaded.
    #[error("Could not load product {0}: {1}")]
    ProductUnavailable(ProductId, FetchFailure),

    /// The requested quantity is zero.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}
