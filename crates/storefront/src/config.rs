//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CATALOG_API_URL` - Catalog API base URL (default: <https://apis.ccbp.in>)
//! - `CATALOG_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `NXT_DATA_DIR` - Directory for local storage and cookies (default: .nxt-trendz)
//! - `CART_STORAGE_KEY` - Storage key of the serialized cart (default: myCartList)
//! - `CREDENTIAL_TOKEN_KEY` - Cookie name of the bearer token (default: `jwt_token`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::cart::DEFAULT_CART_KEY;

/// Default cookie name of the bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "jwt_token";

const DEFAULT_CATALOG_API_URL: &str = "https://apis.ccbp.in";
const LOCAL_STORAGE_FILE: &str = "local-storage.json";
const COOKIES_FILE: &str = "cookies.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding local storage and cookie files
    pub data_dir: PathBuf,
    /// Storage key of the serialized cart list
    pub cart_key: String,
    /// Cookie name of the bearer token
    pub token_key: String,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; always ends with `/` so resource paths join beneath it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        Ok(Self {
            catalog: CatalogConfig::from_lookup(&env)?,
            data_dir: PathBuf::from(env.get_or_default("NXT_DATA_DIR", ".nxt-trendz")),
            cart_key: env.get_or_default("CART_STORAGE_KEY", DEFAULT_CART_KEY),
            token_key: env.get_or_default("CREDENTIAL_TOKEN_KEY", DEFAULT_TOKEN_KEY),
        })
    }

    /// File backing the cart's key-value store.
    #[must_use]
    pub fn local_storage_path(&self) -> PathBuf {
        self.data_dir.join(LOCAL_STORAGE_FILE)
    }

    /// File backing the cookie jar.
    #[must_use]
    pub fn cookies_path(&self) -> PathBuf {
        self.data_dir.join(COOKIES_FILE)
    }
}

impl CatalogConfig {
    fn from_lookup(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw_url = env.get_or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL);
        let base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(env.parse_or("CATALOG_TIMEOUT_SECS", 10)?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_optional(key).map_or(Ok(default), |value| {
            value
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Parse a base URL and make sure its path ends with `/`.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("must be an absolute http(s) URL".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "https://apis.ccbp.in/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.cart_key, "myCartList");
        assert_eq!(config.token_key, "jwt_token");
        assert_eq!(
            config.local_storage_path(),
            PathBuf::from(".nxt-trendz/local-storage.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CATALOG_API_URL", "http://localhost:8080/api"),
            ("CATALOG_TIMEOUT_SECS", "3"),
            ("NXT_DATA_DIR", "/tmp/nxt"),
            ("CART_STORAGE_KEY", "cart"),
        ])
        .unwrap();

        assert_eq!(config.catalog.base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert_eq!(config.cookies_path(), PathBuf::from("/tmp/nxt/cookies.json"));
        assert_eq!(config.cart_key, "cart");
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("CATALOG_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_url() {
        let err = load(&[("CATALOG_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = load(&[("CATALOG_API_URL", "mailto:shop@example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), "bad".to_string());
        assert_eq!(err.to_string(), "Invalid environment variable CATALOG_API_URL: bad");
    }
}
