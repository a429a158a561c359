//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local demo store.
//!
//! - `PB_DATA_DIR` - Root directory for the file-backed store
//!   (default: `./data`)
//! - `PB_CHECKOUT_DELAY_MS` - Simulated payment-gateway latency during
//!   checkout, in milliseconds (default: 0)
//! - `PB_SEED_ADMIN_PASSWORD` - Password for the seeded admin account.
//!   When set it must pass strength validation (length, placeholder
//!   blocklist, entropy); when absent the seeder generates one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Default root for the file-backed store.
const DEFAULT_DATA_DIR: &str = "./data";

/// Minimum length for the seeded admin password.
const MIN_SEED_PASSWORD_LENGTH: usize = 12;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Root directory for the file-backed store.
    pub data_dir: PathBuf,
    /// Simulated payment-gateway latency applied during checkout.
    pub checkout_delay: Duration,
    /// Optional pre-validated password for the seeded admin account.
    pub seed_admin_password: Option<SecretString>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or the seed
    /// admin password fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("PB_DATA_DIR", DEFAULT_DATA_DIR));

        let delay_ms = get_env_or_default("PB_CHECKOUT_DELAY_MS", "0")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PB_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?;

        let seed_admin_password = match get_optional_env("PB_SEED_ADMIN_PASSWORD") {
            Some(value) => {
                validate_seed_password(&value, "PB_SEED_ADMIN_PASSWORD")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            data_dir,
            checkout_delay: Duration::from_millis(delay_ms),
            seed_admin_password,
        })
    }

    /// Expose the seed admin password, if configured.
    #[must_use]
    pub fn seed_admin_password(&self) -> Option<&str> {
        self.seed_admin_password
            .as_ref()
            .map(ExposeSecret::expose_secret)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            checkout_delay: Duration::ZERO,
            seed_admin_password: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that the seed admin password is not a placeholder and has
/// enough length and entropy to be worth seeding.
fn validate_seed_password(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SEED_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SEED_PASSWORD_LENGTH,
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated password."
            ),
        ));
    }

    Ok(())
}
