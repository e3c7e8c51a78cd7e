//! Remote store configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote city store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    base_url: String,
    timeout: Duration,
}

impl StoreConfig {
    /// Validate and normalize a store base URL.
    ///
    /// The URL must carry an `http://` or `https://` scheme; surrounding
    /// whitespace and trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::InvalidConfig("store URL must not be empty".to_string()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidConfig(
                "store URL must include http:// or https://".to_string(),
            ));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Normalized base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
