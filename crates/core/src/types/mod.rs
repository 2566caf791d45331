//! Core types for Nxt Trendz.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::{CartEntry, CartList, CartSummary};
pub use id::*;
pub use price::Price;
pub use product::ProductRecord;
pub use quantity::Quantity;
