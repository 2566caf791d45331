//! Bearer token storage.

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use super::{CredentialStore, KeyValueStore, StorageError};

/// Credential store kept in a key-value store, like a browser cookie jar.
///
/// An unreadable jar is treated as holding no token.
#[derive(Debug, Clone)]
pub struct CookieJar<K> {
    storage: K,
}

impl<K: KeyValueStore> CookieJar<K> {
    /// Wrap a key-value store.
    #[must_use]
    pub const fn new(storage: K) -> Self {
        Self { storage }
    }

    /// Save a token. Used by login, which sits outside the storefront state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn store_token(&self, key: &str, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set(key, token.expose_secret())
    }

    /// Forget the token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn clear_token(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(key)
    }
}

impl<K: KeyValueStore> CredentialStore for CookieJar<K> {
    fn get(&self, key: &str) -> Option<SecretString> {
        match self.storage.get(key) {
            Ok(Some(token)) if !token.is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read credential store");
                None
            }
        }
    }
}
