//! Cart commands.

use nxt_trendz_core::{CartSummary, ProductId};
use nxt_trendz_storefront::auth::Navigation;
use nxt_trendz_storefront::config::StorefrontConfig;
use nxt_trendz_storefront::product_details::FetchState;
use nxt_trendz_storefront::routes::Route;
use nxt_trendz_storefront::state::DefaultStorefront;

use super::CommandError;

/// Open the storefront, refusing if the cart view would redirect to login.
fn open(config: StorefrontConfig) -> Result<DefaultStorefront, CommandError> {
    let storefront = DefaultStorefront::from_config(config)?;
    match storefront.navigate(&Route::Cart.path()) {
        Navigation::Render(_) => Ok(storefront),
        Navigation::Redirect(_) => Err(CommandError::NotLoggedIn),
    }
}

/// Print every cart entry and the order total.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened.
#[allow(clippy::print_stdout)]
pub fn list(config: StorefrontConfig) -> Result<(), CommandError> {
    let storefront = open(config)?;
    let cart = storefront.cart().snapshot();

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for entry in &cart {
        println!(
            "[{}] {} by {}  {} x {} = {}",
            entry.id(),
            entry.product.title,
            entry.product.brand,
            entry.product.price,
            entry.quantity,
            entry.line_total()
        );
    }
    println!();
    print_summary(&cart.summary());
    Ok(())
}

/// Load product `id` and add it to the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded.
pub async fn add(
    config: StorefrontConfig,
    id: ProductId,
    quantity: Option<u32>,
) -> Result<(), CommandError> {
    let storefront = open(config)?;
    let page = super::product::load(&storefront, id).await?;

    if let FetchState::Success { product, .. } = page.fetch_state() {
        storefront.cart().add_item(product, quantity);
    }
    print_summary(&storefront.cart().summary());
    Ok(())
}

/// Remove product `id` from the cart.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened.
pub fn remove(config: StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let storefront = open(config)?;
    storefront.cart().remove_item(id);
    print_summary(&storefront.cart().summary());
    Ok(())
}

/// Increase the quantity of product `id` by one.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened.
pub fn increment(config: StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let storefront = open(config)?;
    storefront.cart().increment_quantity(id);
    print_summary(&storefront.cart().summary());
    Ok(())
}

/// Decrease the quantity of product `id` by one.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened.
pub fn decrement(config: StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let storefront = open(config)?;
    storefront.cart().decrement_quantity(id);
    print_summary(&storefront.cart().summary());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened.
pub fn clear(config: StorefrontConfig) -> Result<(), CommandError> {
    let storefront = open(config)?;
    storefront.cart().clear_all();
    print_summary(&storefront.cart().summary());
    Ok(())
}

#[allow(clippy::print_stdout)]
pub(crate) fn print_summary(summary: &CartSummary) {
    println!("Order Total: {}", summary.total);
    println!("{} items in cart", summary.item_count);
}
