//! # Fetch Settings
//!
//! Object store connection settings loaded from environment variables.
//! CLI flags override them in [`crate::runtime`].

use crate::constants::DEFAULT_REGION;

/// Object store connection settings
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Region for the S3 client (`BLOBSTORE_REGION`)
    pub region: String,
    /// S3-compatible endpoint override (`BLOBSTORE_ENDPOINT`)
    /// When set, requests use path-style addressing
    pub endpoint_url: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl FetchSettings {
    /// Load settings from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            region: env_var_or_default("BLOBSTORE_REGION", DEFAULT_REGION.to_string()),
            endpoint_url: std::env::var("BLOBSTORE_ENDPOINT")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Apply CLI overrides on top of the current values
    #[must_use]
    pub fn with_overrides(mut self, region: Option<String>, endpoint_url: Option<String>) -> Self {
        if let Some(region) = region {
            self.region = region;
        }
        if endpoint_url.is_some() {
            self.endpoint_url = endpoint_url;
        }
        self
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
