//! Runtime configuration for the sync core.

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;

/// Default restaurant API endpoint (the development server's port).
pub const DEFAULT_API_URL: &str = "http://localhost:1337";

/// Environment variable overriding the API endpoint.
pub const API_URL_ENV: &str = "BISTRO_API_URL";

/// Core configuration: where the remote API lives.
///
/// Filesystem concerns (the local store path) are resolved by the consuming
/// client, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a config from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = normalize_text_option(std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url }
    }

    /// Override the API endpoint, ignoring blank values.
    #[must_use]
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = normalize_text_option(api_url) {
            self.api_url = url;
        }
        self
    }
}
