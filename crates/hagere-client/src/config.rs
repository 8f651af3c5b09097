//! client configuration

use serde::{Deserialize, Serialize};

/// env var naming the backend base url
pub const API_URL_ENV: &str = "HAGERE_API_URL";

/// local backend default
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// backend connection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// backend base url, no trailing slash
    pub base_url: String,
    /// request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// base url from `HAGERE_API_URL`, falling back to the local default
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(&url),
            _ => Self::default(),
        }
    }
}
