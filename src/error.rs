//! Error types for Platega API calls.
//!
//! Every failure surfaces as a [`PlategaError`]. It is raised where the failure is
//! detected and reaches the caller unchanged; nothing in this crate retries.
//!
//! # Error Categories
//!
//! - **Network** ([`PlategaError::Network`]): no HTTP response was obtained
//!   (connection refused, timeout, DNS, TLS)
//! - **Decode** ([`PlategaError::Decode`]): a success response was not JSON, or did not
//!   match the expected response record
//! - **API** ([`PlategaError::Api`]): the server answered with status `>= 400`; the
//!   [`ApiErrorKind`] tells which status family
//! - **Encode** ([`PlategaError::Encode`]): the request payload could not be serialized
//!
//! # Precedence
//!
//! A body that is not JSON on an error status becomes an [`ApiErrorKind::Other`] API
//! error carrying the raw text as message and body, whatever the status code was.
//! It is never reported as a decode error.

use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Result type alias for Platega operations.
pub type Result<T> = std::result::Result<T, PlategaError>;

/// Errors that can occur while calling the Platega API.
#[derive(Debug, thiserror::Error)]
pub enum PlategaError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to encode request payload: {0}")]
    Encode(String),
}

impl PlategaError {
    /// HTTP status of the failed response, for API errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PlategaError::Api(err) => err.status_code,
            _ => None,
        }
    }

    /// Returns the API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            PlategaError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, PlategaError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, PlategaError::Decode(_))
    }
}

/// Transport-level failure before any HTTP response existed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Network error: {message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds the message from an error and its whole source chain, so the
    /// underlying cause (e.g. `Connection refused`) is kept.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self { message }
    }
}

/// A response was received but could not be turned into the expected record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
    /// Raw response text, when the body was not JSON.
    pub body: Option<String>,
}

/// Status family of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    Server,
    /// Any other status `>= 400`, and every non-JSON error body.
    Other,
}

impl ApiErrorKind {
    /// Maps an error status to its kind. Total over all status codes.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            s if s >= 500 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest => "Bad request",
            ApiErrorKind::Unauthorized => "Unauthorized",
            ApiErrorKind::Forbidden => "Forbidden",
            ApiErrorKind::NotFound => "Not found",
            ApiErrorKind::Server => "Server error",
            ApiErrorKind::Other => "API error",
        }
    }
}

impl Display for ApiErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON; raw text.
    Text(String),
}

/// Application-level failure reported by the server (status `>= 400`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}{}: {message}", status_suffix(.status_code))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// Path template of the API method that failed, e.g. `/transaction/process`.
    pub method: Option<String>,
    pub status_code: Option<u16>,
    pub body: Option<ErrorBody>,
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl ApiError {
    /// Builds the error for a JSON error body, choosing the kind from `status`.
    ///
    /// The message is the body's `message` field when the body is an object
    /// (empty if the field is missing), otherwise the body rendered as text.
    pub fn from_json(method: &str, status: u16, body: Value) -> Self {
        let message = match &body {
            Value::Object(map) => match map.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            },
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            kind: ApiErrorKind::from_status(status),
            message,
            method: Some(method.to_string()),
            status_code: Some(status),
            body: Some(ErrorBody::Json(body)),
        }
    }

    /// Builds the error for an error body that is not JSON. Always [`ApiErrorKind::Other`].
    pub fn from_text(method: &str, status: u16, text: String) -> Self {
        Self {
            kind: ApiErrorKind::Other,
            message: text.clone(),
            method: Some(method.to_string()),
            status_code: Some(status),
            body: Some(ErrorBody::Text(text)),
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.kind == ApiErrorKind::BadRequest
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == ApiErrorKind::Forbidden
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    pub fn is_server_error(&self) -> bool {
        self.kind == ApiErrorKind::Server
    }
}
