//! Authentication gate for protected views.
//!
//! A bearer token in the credential store is the only authorization signal.
//! The decision is re-evaluated on every navigation, so a token removed
//! mid-session takes effect on the next protected navigation; views that
//! are already rendered are left alone.

use secrecy::SecretString;
use tracing::debug;

use crate::product_details::FetchState;
use crate::routes::Route;
use crate::storage::CredentialStore;

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<V = Route> {
    /// Render the requested view.
    Render(V),
    /// Go somewhere else instead. The original target is not remembered.
    Redirect(Redirect),
}

/// A redirect directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Where to go.
    pub to: Route,
    /// Replace the current history entry rather than pushing a new one.
    pub replace: bool,
}

impl Redirect {
    /// Redirect to the login view.
    #[must_use]
    pub const fn to_login() -> Self {
        Self {
            to: Route::Login,
            replace: true,
        }
    }

    /// Redirect to the not-found view.
    #[must_use]
    pub const fn to_not_found() -> Self {
        Self {
            to: Route::NotFound,
            replace: true,
        }
    }
}

/// Decides whether protected views may render.
#[derive(Debug, Clone)]
pub struct AuthGate<C> {
    credentials: C,
    token_key: String,
}

impl<C: CredentialStore> AuthGate<C> {
    /// Create a gate reading the token stored under `token_key`.
    #[must_use]
    pub fn new(credentials: C, token_key: &str) -> Self {
        Self {
            credentials,
            token_key: token_key.to_string(),
        }
    }

    /// The current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.credentials.get(&self.token_key)
    }

    /// Whether a token is present right now.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Gate a protected view.
    ///
    /// With a token the view is passed through untouched; without one the
    /// result is a login redirect, whichever view was asked for.
    pub fn protect<V>(&self, view: V) -> Navigation<V> {
        if self.is_authenticated() {
            Navigation::Render(view)
        } else {
            debug!("No token, redirecting to login");
            Navigation::Redirect(Redirect::to_login())
        }
    }

    /// Resolve a path through the route table and the gate.
    ///
    /// Unknown paths redirect to not-found. Public routes always render.
    pub fn navigate(&self, path: &str) -> Navigation {
        let Some(route) = Route::parse(path) else {
            debug!(path, "No route matches, redirecting to not-found");
            return Navigation::Redirect(Redirect::to_not_found());
        };

        if route.is_protected() {
            self.protect(route)
        } else {
            Navigation::Render(route)
        }
    }

    /// React to a product load result.
    ///
    /// An `Unauthorized` result means the API rejected the token, so the
    /// user is sent back to login.
    #[must_use]
    pub fn review(&self, state: &FetchState) -> Option<Redirect> {
        match state {
            FetchState::Unauthorized => Some(Redirect::to_login()),
            _ => None,
        }
    }
}
