//! Storage collaborators.
//!
//! The storefront keeps two pieces of durable client state:
//!
//! - the serialized cart list, in a [`KeyValueStore`]
//! - the bearer token, in a [`CredentialStore`]
//!
//! Both are plain get/set interfaces; each store holds a single logical
//! value so no multi-key transactions are needed.

mod credentials;
mod file;
mod memory;

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;

pub use credentials::CookieJar;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid key-value document.
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable string-keyed storage that survives restarts.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Arc<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read-only access to the bearer token.
///
/// Presence of a token is the only authorization signal; the storefront
/// never writes it.
pub trait CredentialStore: Send + Sync {
    /// Read the token stored under `key`.
    fn get(&self, key: &str) -> Option<SecretString>;
}

impl<C: CredentialStore + ?Sized> CredentialStore for Arc<C> {
    fn get(&self, key: &str) -> Option<SecretString> {
        (**self).get(key)
    }
}
