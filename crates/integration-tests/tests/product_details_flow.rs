//! End-to-end tests for the product detail page.
//!
//! These drive a file-backed storefront against a mock catalog API: auth
//! gating, the fetch state machine, the quantity selector and add to cart.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use nxt_trendz_core::{Price, ProductId, Quantity};
use nxt_trendz_integration_tests::{TestContext, details_body, raw_product};
use nxt_trendz_storefront::auth::{Navigation, Redirect};
use nxt_trendz_storefront::product_details::{FetchFailure, FetchState, ProductDetailsPage};
use nxt_trendz_storefront::routes::Route;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_product(ctx: &TestContext, id: i64, title: &str, price: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(details_body(id, title, price, &[raw_product(99, "Socks", 199)])),
        )
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
async fn test_without_token_no_request_is_made() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let storefront = ctx.storefront();
    assert_eq!(
        storefront.navigate("/products/16"),
        Navigation::Redirect(Redirect::to_login())
    );

    let page = ProductDetailsPage::new();
    storefront.open_product(&page, ProductId::new(16)).await;
    assert_eq!(page.fetch_state(), FetchState::Unauthorized);
}

#[tokio::test]
async fn test_load_select_quantity_and_add_to_cart() {
    let ctx = TestContext::new().await;
    mount_product(&ctx, 16, "Embroidered Net Gown", 62990).await;
    ctx.login("jwt");

    let storefront = ctx.storefront();
    assert_eq!(
        storefront.navigate("/products/16"),
        Navigation::Render(Route::ProductDetails(ProductId::new(16)))
    );

    let page = ProductDetailsPage::new();
    assert!(storefront.open_product(&page, ProductId::new(16)).await);

    match page.fetch_state() {
        FetchState::Success { product, related } => {
            assert_eq!(product.title, "Embroidered Net Gown");
            assert_eq!(related.len(), 1);
            assert_eq!(related.first().unwrap().id, ProductId::new(99));
        }
        other => panic!("expected success, got {other:?}"),
    }

    page.decrement_quantity();
    assert_eq!(page.quantity(), Quantity::ONE);
    page.increment_quantity();
    assert!(storefront.add_to_cart(&page));

    let summary = storefront.cart().summary();
    assert_eq!(summary.item_count, 1);
    assert_eq!(summary.total, Price::from_rupees(125_980));
    assert_eq!(summary.total.to_string(), "Rs 125980/-");
}

#[tokio::test]
async fn test_expired_token_redirects_to_login() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;
    ctx.login("expired");

    let storefront = ctx.storefront();
    let page = ProductDetailsPage::new();
    storefront.open_product(&page, ProductId::new(4)).await;

    assert_eq!(page.fetch_state(), FetchState::Unauthorized);
    assert_eq!(
        storefront.gate().review(&page.fetch_state()),
        Some(Redirect::to_login())
    );
}

#[tokio::test]
async fn test_missing_product_is_not_found_failure() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&ctx.server)
        .await;
    ctx.login("jwt");

    let storefront = ctx.storefront();
    let page = ProductDetailsPage::new();
    storefront.open_product(&page, ProductId::new(404)).await;

    assert_eq!(
        page.fetch_state(),
        FetchState::Failure(FetchFailure::NotFound)
    );
    assert!(!storefront.add_to_cart(&page));
    assert!(storefront.cart().is_empty());
}

#[tokio::test]
async fn test_slow_earlier_response_does_not_overwrite_later_one() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(details_body(1, "Slow", 100, &[]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&ctx.server)
        .await;
    mount_product(&ctx, 2, "Fast", 200).await;
    ctx.login("jwt");

    let storefront = ctx.storefront();
    let page = ProductDetailsPage::new();

    let (first, second) = tokio::join!(
        storefront.open_product(&page, ProductId::new(1)),
        storefront.open_product(&page, ProductId::new(2)),
    );

    assert!(!first);
    assert!(second);
    match page.fetch_state() {
        FetchState::Success { product, .. } => assert_eq!(product.title, "Fast"),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_applies_to_next_navigation() {
    let ctx = TestContext::new().await;
    ctx.login("jwt");

    let storefront = ctx.storefront();
    assert_eq!(storefront.navigate("/cart"), Navigation::Render(Route::Cart));

    ctx.logout();
    assert_eq!(
        storefront.navigate("/cart"),
        Navigation::Redirect(Redirect::to_login())
    );
    assert_eq!(
        storefront.navigate("/nowhere"),
        Navigation::Redirect(Redirect::to_not_found())
    );
}

#[tokio::test]
async fn test_revisit_with_revoked_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer revoked"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_body(1, "Shirt", 500, &[])))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/2"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_body(2, "Shoes", 900, &[])))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.login("good");

    let storefront = ctx.storefront();
    let page = ProductDetailsPage::new();
    storefront.open_product(&page, ProductId::new(1)).await;
    storefront.open_product(&page, ProductId::new(2)).await;
    assert!(matches!(page.fetch_state(), FetchState::Success { .. }));

    ctx.login("revoked");
    assert!(storefront.open_product(&page, ProductId::new(1)).await);

    assert_eq!(page.fetch_state(), FetchState::Unauthorized);
    assert_eq!(
        storefront.gate().review(&page.fetch_state()),
        Some(Redirect::to_login())
    );
    assert_eq!(ctx.server.received_requests().await.map(|r| r.len()), Some(3));
}
