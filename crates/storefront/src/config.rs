//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EMPORIUM_CATALOG_URL` - Product catalog API (default: `https://fakestoreapi.com`)
//! - `EMPORIUM_PAYMENT_RELAY_URL` - Payment-intent relay (default: `http://localhost:4242`)
//! - `EMPORIUM_PAYMENT_API_URL` - Payment processor API (default: `https://api.stripe.com`)
//! - `EMPORIUM_PAYMENT_PUBLISHABLE_KEY` - Processor publishable key (required to check out)
//! - `EMPORIUM_CURRENCY` - Charge currency (default: usd)
//! - `EMPORIUM_DATA_DIR` - Directory for persisted state (default: `.emporium`)

use std::path::PathBuf;

use emporium_core::CurrencyCode;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_PAYMENT_RELAY_URL: &str = "http://localhost:4242";
const DEFAULT_PAYMENT_API_URL: &str = "https://api.stripe.com";
const DEFAULT_DATA_DIR: &str = ".emporium";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the product catalog API
    pub catalog_url: Url,
    /// Base URL of the payment-intent relay
    pub payment_relay_url: Url,
    /// Base URL of the payment processor API
    pub payment_api_url: Url,
    /// Processor publishable key (safe to expose to clients)
    pub publishable_key: Option<String>,
    /// Currency for charges
    pub currency: CurrencyCode,
    /// Directory holding persisted state
    pub data_dir: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_url(DEFAULT_CATALOG_URL),
            payment_relay_url: default_url(DEFAULT_PAYMENT_RELAY_URL),
            payment_api_url: default_url(DEFAULT_PAYMENT_API_URL),
            publishable_key: None,
            currency: CurrencyCode::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
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
    /// Returns `ConfigError::InvalidEnvVar` if a URL or currency fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = parse_url(
            "EMPORIUM_CATALOG_URL",
            &get_env_or_default("EMPORIUM_CATALOG_URL", DEFAULT_CATALOG_URL),
        )?;
        let payment_relay_url = parse_url(
            "EMPORIUM_PAYMENT_RELAY_URL",
            &get_env_or_default("EMPORIUM_PAYMENT_RELAY_URL", DEFAULT_PAYMENT_RELAY_URL),
        )?;
        let payment_api_url = parse_url(
            "EMPORIUM_PAYMENT_API_URL",
            &get_env_or_default("EMPORIUM_PAYMENT_API_URL", DEFAULT_PAYMENT_API_URL),
        )?;
        let currency = get_env_or_default("EMPORIUM_CURRENCY", "usd")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("EMPORIUM_CURRENCY".to_string(), e))?;

        Ok(Self {
            catalog_url,
            payment_relay_url,
            payment_api_url,
            publishable_key: get_optional_env("EMPORIUM_PAYMENT_PUBLISHABLE_KEY"),
            currency,
            data_dir: PathBuf::from(get_env_or_default("EMPORIUM_DATA_DIR", DEFAULT_DATA_DIR)),
        })
    }

    /// The publishable key, required before taking payments.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no key is configured.
    pub fn require_publishable_key(&self) -> Result<&str, ConfigError> {
        self.publishable_key.as_deref().ok_or_else(|| {
            ConfigError::MissingEnvVar("EMPORIUM_PAYMENT_PUBLISHABLE_KEY".to_string())
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a built-in default URL.
fn default_url(value: &str) -> Url {
    Url::parse(value).expect("valid default URL")
}
