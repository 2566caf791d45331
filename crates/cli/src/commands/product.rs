//! Product detail command.

use nxt_trendz_core::{ProductId, ProductRecord};
use nxt_trendz_storefront::config::StorefrontConfig;
use nxt_trendz_storefront::product_details::{FetchFailure, FetchState, ProductDetailsPage};
use nxt_trendz_storefront::state::DefaultStorefront;
use tracing::info;

use super::CommandError;

/// Load a product and print it with its similar products.
///
/// With `add`, the quantity selector is stepped up to the given quantity
/// and the product is added to the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded or the quantity is zero.
pub async fn show(
    config: StorefrontConfig,
    id: ProductId,
    add: Option<u32>,
) -> Result<(), CommandError> {
    if add == Some(0) {
        return Err(CommandError::InvalidQuantity);
    }

    let storefront = DefaultStorefront::from_config(config)?;
    let page = load(&storefront, id).await?;

    if let FetchState::Success { product, related } = page.fetch_state() {
        print_details(&product, &related);
    }

    if let Some(quantity) = add {
        for _ in 1..quantity {
            page.increment_quantity();
        }
        if storefront.add_to_cart(&page) {
            info!(product_id = %id, quantity = %page.quantity(), "Added to cart");
            super::cart::print_summary(&storefront.cart().summary());
        }
    }

    Ok(())
}

/// Load `id` into a fresh page, mapping every non-success state to an error.
pub(crate) async fn load(
    storefront: &DefaultStorefront,
    id: ProductId,
) -> Result<ProductDetailsPage, CommandError> {
    let page = ProductDetailsPage::new();
    storefront.open_product(&page, id).await;

    let state = page.fetch_state();
    if storefront.gate().review(&state).is_some() {
        return Err(CommandError::NotLoggedIn);
    }

    match state {
        FetchState::Success { .. } => Ok(page),
        FetchState::Failure(failure) => Err(CommandError::ProductUnavailable(id, failure)),
        other => Err(CommandError::ProductUnavailable(
            id,
            FetchFailure::Transport(format!("request did not finish ({other:?})")),
        )),
    }
}

#[allow(clippy::print_stdout)]
fn print_details(product: &ProductRecord, related: &[ProductRecord]) {
    println!("{} by {}", product.title, product.brand);
    println!("  {}", product.price);
    println!(
        "  Rating {} ({} reviews), {}",
        product.rating, product.total_reviews, product.availability
    );
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }

    if !related.is_empty() {
        println!();
        println!("Similar products:");
        for item in related {
            println!("  [{}] {} by {}  {}", item.id, item.title, item.brand, item.price);
        }
    }
}
