//! Token and navigation commands.

use nxt_trendz_storefront::auth::Navigation;
use nxt_trendz_storefront::config::StorefrontConfig;
use nxt_trendz_storefront::state::DefaultStorefront;
use nxt_trendz_storefront::storage::{CookieJar, FileStore, StorageError};
use secrecy::SecretString;
use tracing::info;

use super::CommandError;

fn cookie_jar(config: &StorefrontConfig) -> Result<CookieJar<FileStore>, CommandError> {
    std::fs::create_dir_all(&config.data_dir).map_err(StorageError::from)?;
    Ok(CookieJar::new(FileStore::new(config.cookies_path())))
}

/// Store `token` as the bearer token.
///
/// # Errors
///
/// Returns an error if the cookie file cannot be written.
pub fn login(config: &StorefrontConfig, token: String) -> Result<(), CommandError> {
    cookie_jar(config)?.store_token(&config.token_key, &SecretString::from(token))?;
    info!("Token stored");
    Ok(())
}

/// Remove the stored bearer token.
///
/// # Errors
///
/// Returns an error if the cookie file cannot be written.
pub fn logout(config: &StorefrontConfig) -> Result<(), CommandError> {
    cookie_jar(config)?.clear_token(&config.token_key)?;
    info!("Token removed");
    Ok(())
}

/// Print what `path` resolves to.
///
/// # Errors
///
/// Returns an error if the storefront cannot be assembled.
#[allow(clippy::print_stdout)]
pub fn navigate(config: StorefrontConfig, path: &str) -> Result<(), CommandError> {
    let storefront = DefaultStorefront::from_config(config)?;

    match storefront.navigate(path) {
        Navigation::Render(route) => println!("render {route}"),
        Navigation::Redirect(redirect) => {
            let mode = if redirect.replace { "replace" } else { "push" };
            println!("redirect {} ({mode})", redirect.to);
        }
    }
    Ok(())
}
