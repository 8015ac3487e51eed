//! A [`Session`] that talks to the Platega API over HTTPS with `reqwest`.
//!
//! ## Example
//!
//! ```rust
//! use platega::session::ReqwestSession;
//! use std::time::Duration;
//!
//! let session = ReqwestSession::try_from("https://app.platega.io")
//!     .unwrap()
//!     .with_timeout(Duration::from_secs(30));
//! ```
//!
//! ## Behaviour
//!
//! - The connection pool is created on first use and shared by every call made
//!   through the session. [`Session::close`] drops it; the next call creates a new one.
//! - TLS uses rustls with the bundled webpki root store; certificates are verified.
//! - No retries and no timeout unless one is configured.
//! - Integrates with `tracing` if the `telemetry` feature is enabled

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

use platega_types::config::PlategaConfig;
use platega_types::methods::{HttpMethod, PlategaMethod, query_pairs};

use crate::error::{ApiError, DecodeError, NetworkError, PlategaError};
use crate::session::{Credentials, MERCHANT_ID_HEADER, SECRET_HEADER, Session};

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

/// `reqwest`-backed [`Session`] with a lazily created connection pool.
#[derive(Debug)]
pub struct ReqwestSession {
    /// API origin, e.g. `https://app.platega.io`
    api_url: Url,
    /// Optional per-request timeout
    timeout: Option<Duration>,
    /// Connection pool; `None` until first use and after [`Session::close`]
    client: RwLock<Option<Client>>,
}

impl Default for ReqwestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestSession {
    /// Creates a session for the production Platega host.
    pub fn new() -> Self {
        Self::with_api_url(PlategaConfig::default_api_url())
    }

    /// Creates a session for a custom API origin.
    pub fn with_api_url(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: None,
            client: RwLock::new(None),
        }
    }

    /// Creates a session from the URL and timeout in `config`.
    pub fn from_config(config: &PlategaConfig) -> Self {
        let session = Self::with_api_url(config.api_url.clone());
        match config.timeout() {
            Some(timeout) => session.with_timeout(timeout),
            None => session,
        }
    }

    /// Sets a timeout for every request made through this session.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the API origin used by this session.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether a connection pool is currently held.
    pub async fn is_open(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Returns the full URL `method` is sent to.
    pub fn method_url<M: PlategaMethod>(&self, method: &M) -> String {
        format!(
            "{}{}",
            self.api_url.as_str().trim_end_matches('/'),
            method.api_path()
        )
    }

    /// Returns the pooled client, creating it on first use.
    async fn client(&self) -> Result<Client, NetworkError> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(client.clone());
        }
        let mut guard = self.client.write().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| NetworkError::from_error(&e))?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(api_url = %self.api_url, "platega.session.pool_created");
        *guard = Some(client.clone());
        Ok(client)
    }
}

impl Session for ReqwestSession {
    /// Sends `method` and decodes the response into `M::Response`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "platega.session.make_request",
            skip_all,
            fields(
                api_method = M::API_METHOD,
                http_method = %M::HTTP_METHOD,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn make_request<M>(
        &self,
        credentials: &Credentials,
        method: &M,
    ) -> Result<M::Response, PlategaError>
    where
        M: PlategaMethod,
    {
        let result = self.send(credentials, method).await;
        record_result_on_span(&result);
        result
    }

    async fn close(&self) {
        if self.client.write().await.take().is_some() {
            #[cfg(feature = "telemetry")]
            tracing::debug!(api_url = %self.api_url, "platega.session.pool_released");
        }
    }
}

impl ReqwestSession {
    async fn send<M: PlategaMethod>(
        &self,
        credentials: &Credentials,
        method: &M,
    ) -> Result<M::Response, PlategaError> {
        let client = self.client().await?;
        let url = self.method_url(method);
        let payload = method
            .payload()
            .map_err(|e| PlategaError::Encode(e.to_string()))?;

        let mut req = match M::HTTP_METHOD {
            HttpMethod::Post => client.post(url).json(&payload),
            HttpMethod::Get => client.get(url).query(&query_pairs(&payload)),
        };
        req = req
            .header(MERCHANT_ID_HEADER, credentials.merchant_id())
            .header(SECRET_HEADER, credentials.secret());
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req.send().await.map_err(|e| NetworkError::from_error(&e))?;
        let status = http_response.status().as_u16();
        // A response exists once the status is read; body failures are decode errors.
        let text = http_response.text().await.map_err(|e| DecodeError {
            message: format!(
                "Failed to read response from {}: {}",
                M::API_METHOD,
                NetworkError::from_error(&e).message
            ),
            body: None,
        })?;

        decode_response(M::API_METHOD, status, text)
    }
}

/// Classifies a raw HTTP response.
///
/// - not JSON, status `>= 400`: generic [`ApiError`] with the raw text
/// - not JSON, status `< 400`: [`DecodeError`]
/// - JSON, status `>= 400`: [`ApiError`] of the kind matching the status
/// - JSON, status `< 400`: the body decoded as `R`, or [`DecodeError`]
pub fn decode_response<R>(api_method: &str, status: u16, text: String) -> Result<R, PlategaError>
where
    R: DeserializeOwned,
{
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(body) => body,
        Err(_) if status >= 400 => {
            return Err(ApiError::from_text(api_method, status, text).into());
        }
        Err(_) => {
            return Err(DecodeError {
                message: format!("Failed to decode response from {api_method}: {text}"),
                body: Some(text),
            }
            .into());
        }
    };

    if status >= 400 {
        return Err(ApiError::from_json(api_method, status, body).into());
    }

    serde_json::from_value::<R>(body).map_err(|e| {
        DecodeError {
            message: format!("Failed to parse response from {api_method}: {e}"),
            body: None,
        }
        .into()
    })
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::DEBUG, error = %err, "Platega request failed");
        }
    }
}

/// Records the outcome of a request on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Converts a string URL into a [`ReqwestSession`].
impl TryFrom<&str> for ReqwestSession {
    type Error = url::ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value.trim_end_matches('/')).map(ReqwestSession::with_api_url)
    }
}

/// Converts a String URL into a [`ReqwestSession`].
impl TryFrom<String> for ReqwestSession {
    type Error = url::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReqwestSession::try_from(value.as_str())
    }
}
