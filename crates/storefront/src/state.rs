//! Storefront state shared across views.

use std::sync::Arc;

use nxt_trendz_core::ProductId;
use tracing::{debug, instrument};

use crate::auth::{AuthGate, Navigation};
use crate::cart::CartStore;
use crate::catalog::{CatalogClient, ProductSource};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::product_details::ProductDetailsPage;
use crate::storage::{CookieJar, CredentialStore, FileStore, KeyValueStore};

/// Storefront backed by files on disk and the HTTP catalog API.
pub type DefaultStorefront = Storefront<FileStore, CookieJar<FileStore>, CatalogClient>;

/// Storefront state shared across all views.
///
/// This struct is cheaply cloneable via `Arc`; clones share one cart, one
/// auth gate and one catalog source.
pub struct Storefront<K, C, S> {
    inner: Arc<StorefrontInner<K, C, S>>,
}

struct StorefrontInner<K, C, S> {
    config: StorefrontConfig,
    cart: CartStore<K>,
    gate: AuthGate<C>,
    catalog: S,
}

impl<K, C, S> Clone for Storefront<K, C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, C, S> Storefront<K, C, S>
where
    K: KeyValueStore,
    C: CredentialStore,
    S: ProductSource,
{
    /// Assemble a storefront from its collaborators.
    ///
    /// Loads the cart from `storage` under the configured key.
    pub fn new(config: StorefrontConfig, storage: K, credentials: C, catalog: S) -> Self {
        let cart = CartStore::open(storage, &config.cart_key);
        let gate = AuthGate::new(credentials, &config.token_key);

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                cart,
                gate,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore<K> {
        &self.inner.cart
    }

    /// Get a reference to the auth gate.
    #[must_use]
    pub fn gate(&self) -> &AuthGate<C> {
        &self.inner.gate
    }

    /// Get a reference to the product source.
    #[must_use]
    pub fn catalog(&self) -> &S {
        &self.inner.catalog
    }

    /// Resolve a path through the route table and the auth gate.
    pub fn navigate(&self, path: &str) -> Navigation {
        self.inner.gate.navigate(path)
    }

    /// Load product `id` into `page`.
    ///
    /// Without a token the page goes straight to `Unauthorized` and the API
    /// is not contacted. Returns whether a result was applied to `page`.
    #[instrument(skip(self, page), fields(product_id = %id))]
    pub async fn open_product(&self, page: &ProductDetailsPage, id: ProductId) -> bool {
        let Some(token) = self.inner.gate.token() else {
            debug!("No token, product not requested");
            page.deny(id);
            return true;
        };

        page.load(&self.inner.catalog, id, &token).await
    }

    /// Add the product loaded in `page` to the cart with its selected
    /// quantity. Returns `false` if nothing is loaded.
    pub fn add_to_cart(&self, page: &ProductDetailsPage) -> bool {
        page.add_to_cart(&self.inner.cart)
    }
}

impl DefaultStorefront {
    /// Build the file-backed storefront described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog client cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir).map_err(crate::storage::StorageError::from)?;

        let storage = FileStore::new(config.local_storage_path());
        let credentials = CookieJar::new(FileStore::new(config.cookies_path()));
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self::new(config, storage, credentials, catalog))
    }
}
