//! Environment-driven configuration.
//!
//! Every setting has a default; a missing or invalid value is logged and
//! replaced by the default rather than failing startup.

use serde::{Deserialize, Serialize};

use storefront_catalog::SortOrder;

pub const API_URL_VAR: &str = "STOREFRONT_API_URL";
pub const DEFAULT_SORT_VAR: &str = "STOREFRONT_DEFAULT_SORT";

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub api_base_url: String,
    /// Sort order a fresh listing starts with.
    pub default_sort: SortOrder,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            default_sort: SortOrder::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = match lookup(API_URL_VAR).map(|v| v.trim().to_string()) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.trim_end_matches('/').to_string()
            }
            Some(url) => {
                tracing::warn!(%url, "{API_URL_VAR} is not an http(s) URL; using default");
                defaults.api_base_url
            }
            None => {
                tracing::info!("{API_URL_VAR} not set; using default {DEFAULT_API_URL}");
                defaults.api_base_url
            }
        };

        let default_sort = match lookup(DEFAULT_SORT_VAR) {
            Some(raw) => raw.parse::<SortOrder>().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid {DEFAULT_SORT_VAR}; using default");
                defaults.default_sort
            }),
            None => defaults.default_sort,
        };

        Self {
            api_base_url,
            default_sort,
        }
    }
}
