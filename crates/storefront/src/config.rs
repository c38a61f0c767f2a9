//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PINAKA_CART_DIR` - Directory holding the persisted cart (default: .pinaka)
//! - `PINAKA_CART_KEY` - Storage key of the cart record (default: pinaka-cart-storage)
//! - `PINAKA_CURRENCY` - Display currency: IRR, USD or EUR (default: IRR)
//! - `PINAKA_LOG_JSON` - Emit logs as JSON (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use pinaka_core::CurrencyCode;
use thiserror::Error;

use crate::cart::DEFAULT_STORAGE_KEY;
use crate::storage::FileStorage;

const DEFAULT_CART_DIR: &str = ".pinaka";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed cart storage
    pub cart_dir: PathBuf,
    /// Storage key of the cart record
    pub cart_key: String,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            cart_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            log_json: false,
            sentry_dsn: None,
        }
    }
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

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cart_dir = PathBuf::from(get_or_default(&lookup, "PINAKA_CART_DIR", DEFAULT_CART_DIR));
        if cart_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "PINAKA_CART_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let cart_key = get_or_default(&lookup, "PINAKA_CART_KEY", DEFAULT_STORAGE_KEY);
        FileStorage::new(&cart_dir)
            .path_for(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("PINAKA_CART_KEY".to_string(), e.to_string()))?;

        let currency = get_or_default(&lookup, "PINAKA_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("PINAKA_CURRENCY".to_string(), e.to_string()))?;

        let log_json = parse_bool(&get_or_default(&lookup, "PINAKA_LOG_JSON", "false"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "PINAKA_LOG_JSON".to_string(),
                    "expected true or false".to_string(),
                )
            })?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            cart_dir,
            cart_key,
            currency,
            log_json,
            sentry_dsn,
        })
    }

    /// File storage rooted at the configured cart directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.cart_dir)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
