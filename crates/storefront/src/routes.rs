//! Storefront route table.
//!
//! # Route Structure
//!
//! ```text
//! /login            - Login form (public)
//! /                 - Home (requires token)
//! /products         - Product listing (requires token)
//! /products/{id}    - Product detail (requires token)
//! /cart             - Cart (requires token)
//! /not-found        - Not found page (public)
//! *                 - Redirects to /not-found
//! ```

use std::fmt;

use nxt_trendz_core::ProductId;

/// A view the storefront can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Products,
    ProductDetails(ProductId),
    Cart,
    NotFound,
}

impl Route {
    /// Match a path against the route table.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns
    /// `None` for paths that match no route, including product paths whose
    /// ID is not numeric.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        let mut segments = trimmed.split('/').skip(1);
        let route = match (segments.next(), segments.next()) {
            (None, None) if path.starts_with('/') => Self::Home,
            (Some("login"), None) => Self::Login,
            (Some("products"), None) => Self::Products,
            (Some("products"), Some(id)) => Self::ProductDetails(id.parse().ok()?),
            (Some("cart"), None) => Self::Cart,
            (Some("not-found"), None) => Self::NotFound,
            _ => return None,
        };

        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Home => "/".to_string(),
            Self::Products => "/products".to_string(),
            Self::ProductDetails(id) => format!("/products/{id}"),
            Self::Cart => "/cart".to_string(),
            Self::NotFound => "/not-found".to_string(),
        }
    }

    /// Whether rendering this route requires a token.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Products | Self::ProductDetails(_) | Self::Cart
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
