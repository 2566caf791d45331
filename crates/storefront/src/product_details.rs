//! Product detail page state.
//!
//! Loads one product and its similar products and tracks the quantity
//! selector shown next to "add to cart".
//!
//! # Transitions
//!
//! ```text
//! Initial               --begin(id)--------------------> Loading
//! Loading               --2xx with a valid body--------> Success { product, related }
//! Loading               --404--------------------------> Failure(NotFound)
//! Loading               --401--------------------------> Unauthorized
//! Loading               --other failure----------------> Failure(..)
//! Success / Loading     --begin(other id)--------------> Loading
//! Failure, Unauthorized --begin(any id)----------------> Loading
//! ```
//!
//! Every `begin` bumps a generation counter and hands out a [`FetchTicket`]
//! carrying it. A result is applied only if its ticket still carries the
//! latest generation, so when requests for two IDs overlap the state
//! always reflects the one issued last, whatever order they resolve in.

use nxt_trendz_core::{ProductId, ProductRecord, Quantity};
use secrecy::SecretString;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::cart::CartStore;
use crate::catalog::{CatalogError, ProductDetails, ProductSource};
use crate::storage::KeyValueStore;

/// Load state of the product detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Initial,
    /// Waiting for the catalog API.
    Loading { id: ProductId },
    /// Product and similar products loaded.
    Success {
        product: ProductRecord,
        related: Vec<ProductRecord>,
    },
    /// The product could not be loaded.
    Failure(FetchFailure),
    /// The API rejected the token.
    Unauthorized,
}

/// Why a product could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The API returned 404.
    #[error("Product not found")]
    NotFound,
    /// The API returned another non-success status.
    #[error("Catalog API returned status {0}")]
    Status(u16),
    /// The request never completed.
    #[error("Request failed: {0}")]
    Transport(String),
    /// The response body was not a valid product.
    #[error("Malformed product response: {0}")]
    Malformed(String),
}

impl From<Result<ProductDetails, CatalogError>> for FetchState {
    fn from(outcome: Result<ProductDetails, CatalogError>) -> Self {
        match outcome {
            Ok(ProductDetails { product, related }) => Self::Success { product, related },
            Err(CatalogError::NotFound(_)) => Self::Failure(FetchFailure::NotFound),
            Err(CatalogError::Unauthorized) => Self::Unauthorized,
            Err(CatalogError::RateLimited(_)) => Self::Failure(FetchFailure::Status(429)),
            Err(CatalogError::UnexpectedStatus(status)) => {
                Self::Failure(FetchFailure::Status(status))
            }
            Err(CatalogError::Parse(e)) => Self::Failure(FetchFailure::Malformed(e.to_string())),
            Err(e @ (CatalogError::Http(_) | CatalogError::InvalidUrl(_))) => {
                Self::Failure(FetchFailure::Transport(e.to_string()))
            }
        }
    }
}

/// Everything the rendering layer needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    /// Load state.
    pub fetch: FetchState,
    /// Quantity selector value.
    pub quantity: Quantity,
    product_id: Option<ProductId>,
    generation: u64,
}

impl PageState {
    /// The product this page is showing or loading.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            fetch: FetchState::Initial,
            quantity: Quantity::ONE,
            product_id: None,
            generation: 0,
        }
    }
}

/// Proof that a fetch was started, needed to apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    id: ProductId,
    generation: u64,
}

impl FetchTicket {
    /// The product being fetched.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }
}

/// State machine behind the product detail page.
#[derive(Debug)]
pub struct ProductDetailsPage {
    state: watch::Sender<PageState>,
}

impl Default for ProductDetailsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductDetailsPage {
    /// Create a page in the `Initial` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(PageState::default()),
        }
    }

    /// Subscribe to page state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    /// A copy of the whole page state.
    #[must_use]
    pub fn snapshot(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// A copy of the load state.
    #[must_use]
    pub fn fetch_state(&self) -> FetchState {
        self.state.borrow().fetch.clone()
    }

    /// Current quantity selector value.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.state.borrow().quantity
    }

    /// Start loading `id`.
    ///
    /// Returns `None` without changing anything when `id` is already loaded
    /// or loading; otherwise moves to `Loading` and returns the ticket the
    /// result must be applied with.
    pub fn begin(&self, id: ProductId) -> Option<FetchTicket> {
        let mut ticket = None;

        self.state.send_if_modified(|page| {
            let current = page.product_id == Some(id)
                && matches!(
                    page.fetch,
                    FetchState::Loading { .. } | FetchState::Success { .. }
                );
            if current {
                return false;
            }

            page.generation += 1;
            page.product_id = Some(id);
            page.fetch = FetchState::Loading { id };
            ticket = Some(FetchTicket {
                id,
                generation: page.generation,
            });
            true
        });

        ticket
    }

    /// Apply the result of a fetch.
    ///
    /// Returns `false` and leaves the state alone if a newer fetch has been
    /// started since `ticket` was issued, or the page was reset.
    pub fn complete(
        &self,
        ticket: FetchTicket,
        outcome: Result<ProductDetails, CatalogError>,
    ) -> bool {
        self.state.send_if_modified(|page| {
            if page.generation != ticket.generation {
                debug!(
                    product_id = %ticket.id,
                    "Discarding superseded product response"
                );
                return false;
            }

            page.fetch = FetchState::from(outcome);
            if matches!(page.fetch, FetchState::Success { .. }) {
                page.quantity = Quantity::ONE;
            }
            true
        })
    }

    /// Load `id` from `source`.
    ///
    /// Does nothing if `id` is already loaded or loading. Returns whether
    /// this call's result was applied.
    #[instrument(skip(self, source, token), fields(product_id = %id))]
    pub async fn load<S: ProductSource>(
        &self,
        source: &S,
        id: ProductId,
        token: &SecretString,
    ) -> bool {
        let Some(ticket) = self.begin(id) else {
            debug!("Product already loaded or loading");
            return false;
        };

        let outcome = source.fetch_product(id, token).await;
        self.complete(ticket, outcome)
    }

    /// Mark `id` as unauthorized without contacting the API.
    ///
    /// Supersedes any fetch still in flight.
    pub fn deny(&self, id: ProductId) {
        self.state.send_modify(|page| {
            page.generation += 1;
            page.product_id = Some(id);
            page.fetch = FetchState::Unauthorized;
        });
    }

    /// Return to `Initial`, as when the page is left.
    ///
    /// Results of fetches still in flight are discarded when they arrive.
    pub fn reset(&self) {
        self.state.send_modify(|page| {
            *page = PageState {
                generation: page.generation + 1,
                ..PageState::default()
            };
        });
    }

    /// Increase the quantity selector by one.
    pub fn increment_quantity(&self) {
        self.state.send_modify(|page| page.quantity = page.quantity.increment());
    }

    /// Decrease the quantity selector by one, stopping at one.
    pub fn decrement_quantity(&self) {
        self.state.send_if_modified(|page| match page.quantity.decrement() {
            Some(quantity) => {
                page.quantity = quantity;
                true
            }
            None => false,
        });
    }

    /// The loaded product with the selected quantity, if loaded.
    #[must_use]
    pub fn selection(&self) -> Option<(ProductRecord, Quantity)> {
        let page = self.state.borrow();
        match &page.fetch {
            FetchState::Success { product, .. } => Some((product.clone(), page.quantity)),
            _ => None,
        }
    }

    /// Add the loaded product to `cart` with the selected quantity.
    ///
    /// Returns `false` if no product is loaded.
    pub fn add_to_cart<K: KeyValueStore>(&self, cart: &CartStore<K>) -> bool {
        let Some((product, quantity)) = self.selection() else {
            return false;
        };
        cart.add_item(product, Some(quantity.get()));
        true
    }
}
