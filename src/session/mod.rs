//! Transport abstraction for dispatching Platega methods.
//!
//! A [`Session`] takes a method descriptor plus the merchant credentials and
//! returns the decoded response or a [`PlategaError`]. [`ReqwestSession`] is the
//! HTTP implementation; tests and applications can provide their own.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use platega_types::methods::PlategaMethod;

use crate::error::PlategaError;

pub mod http;

pub use http::ReqwestSession;

/// Header carrying the merchant id on every request.
pub const MERCHANT_ID_HEADER: &str = "X-MerchantId";
/// Header carrying the merchant secret on every request.
pub const SECRET_HEADER: &str = "X-Secret";

/// Merchant credentials attached to every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(merchant_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret: secret.into(),
        }
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Asynchronous transport for Platega API methods.
pub trait Session: Send + Sync {
    /// Executes `method` and decodes its response.
    ///
    /// # Errors
    ///
    /// Returns [`PlategaError::Network`] when no response was obtained,
    /// [`PlategaError::Api`] for statuses `>= 400`, and [`PlategaError::Decode`]
    /// when a success response does not match `M::Response`.
    fn make_request<M>(
        &self,
        credentials: &Credentials,
        method: &M,
    ) -> impl Future<Output = Result<M::Response, PlategaError>> + Send
    where
        M: PlategaMethod;

    /// Releases pooled connections. Safe to call any number of times.
    fn close(&self) -> impl Future<Output = ()> + Send;
}

impl<T: Session> Session for Arc<T> {
    fn make_request<M>(
        &self,
        credentials: &Credentials,
        method: &M,
    ) -> impl Future<Output = Result<M::Response, PlategaError>> + Send
    where
        M: PlategaMethod,
    {
        self.as_ref().make_request(credentials, method)
    }

    fn close(&self) -> impl Future<Output = ()> + Send {
        self.as_ref().close()
    }
}
