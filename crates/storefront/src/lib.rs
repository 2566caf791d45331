//! Nxt Trendz Storefront library.
//!
//! Client-side state for the storefront. The rendering layer reads state
//! from, and dispatches intents into, three components:
//!
//! - [`cart::CartStore`] - the persistent shopping cart
//! - [`auth::AuthGate`] - decides whether a protected view renders or
//!   redirects to login
//! - [`product_details::ProductDetailsPage`] - the load lifecycle of one product
//!   and its similar products
//!
//! [`state::Storefront`] wires them to their collaborators (key-value
//! storage, the credential cookie jar and the catalog API).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod product_details;
pub mod routes;
pub mod state;
pub mod storage;
