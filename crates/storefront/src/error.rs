//! Unified error handling.
//!
//! Provides a unified `AppError` type for operations that cross module
//! boundaries, such as assembling a [`Storefront`](crate::state::Storefront)
//! from configuration.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
