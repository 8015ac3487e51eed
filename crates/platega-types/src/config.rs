//! Connection settings for the Platega client.
//!
//! [`PlategaConfig`] is plain serde data, so it can be embedded in whatever
//! configuration format the application already uses:
//!
//! ```json
//! {
//!   "merchant_id": "merchant-123",
//!   "secret": "s3cret",
//!   "api_url": "https://app.platega.io",
//!   "timeout_secs": 30
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use url::Url;

/// Production origin of the Platega API.
pub const DEFAULT_API_URL: &str = "https://app.platega.io";

/// Connection settings for a Platega client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlategaConfig {
    /// Sent as `X-MerchantId` on every call.
    pub merchant_id: String,
    /// Sent as `X-Secret` on every call.
    pub secret: String,
    /// API origin; defaults to [`DEFAULT_API_URL`].
    #[serde(default = "PlategaConfig::default_api_url")]
    pub api_url: Url,
    /// Per-request timeout. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PlategaConfig {
    pub fn new(merchant_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret: secret.into(),
            api_url: Self::default_api_url(),
            timeout_secs: None,
        }
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parsed [`DEFAULT_API_URL`].
    pub fn default_api_url() -> Url {
        Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
    }
}

impl Debug for PlategaConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlategaConfig")
            .field("merchant_id", &self.merchant_id)
            .field("secret", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
