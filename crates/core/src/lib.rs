//! Nxt Trendz Core - Shared domain types.
//!
//! This crate provides the types used across all Nxt Trendz components:
//! - `storefront` - Client-side state (cart store, auth gate, product detail loading)
//! - `cli` - Terminal front end driving the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no storage,
//! no HTTP clients. Persistence and networking live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and quantities, plus the
//!   product record and cart list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
