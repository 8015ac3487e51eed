//! The [`Platega`] client: merchant credentials bound to a [`Session`].
//!
//! Every typed operation builds its method descriptor and goes through
//! [`Platega::call`]. The client either owns its session, created on first use
//! and released by [`Platega::close`], or uses one supplied by the caller and
//! never closes it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use platega::Platega;
//! use platega::types::methods::CreateTransaction;
//! use platega::types::proto::{PaymentDetails, PaymentMethod};
//!
//! # async fn run() -> platega::Result<()> {
//! let client = Platega::new("merchant-id", "secret");
//! let created = client
//!     .create_transaction(CreateTransaction::new(
//!         PaymentMethod::SbpQr,
//!         PaymentDetails::new(100.0, "RUB"),
//!     ))
//!     .await?;
//! let status = client.get_transaction_status(created.transaction_id).await?;
//! println!("{:?}", status.status);
//! client.close().await;
//! # Ok(())
//! # }
//! ```

use futures_util::FutureExt;
use std::fmt::{Debug, Formatter};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use platega_types::config::PlategaConfig;
use platega_types::methods::{CreateTransaction, GetConversions, GetRate, GetTransactionStatus, PlategaMethod};
use platega_types::proto::{
    ConversionsResponse, CreateTransactionResponse, RateResponse, TransactionStatusResponse,
};

use crate::error::Result;
use crate::session::{Credentials, ReqwestSession, Session};

type SessionFactory<S> = Box<dyn Fn() -> S + Send + Sync>;

enum SessionSlot<S> {
    /// Created by the client; dropped and closed by [`Platega::close`].
    Owned {
        current: RwLock<Option<Arc<S>>>,
        factory: SessionFactory<S>,
    },
    /// Supplied by the caller.
    Injected(S),
}

/// Async client for the Platega payment API.
pub struct Platega<S = ReqwestSession> {
    credentials: Credentials,
    slot: SessionSlot<S>,
}

impl Platega<ReqwestSession> {
    /// Creates a client that talks to the production host.
    ///
    /// No connection is made until the first call.
    pub fn new(merchant_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::with_session_factory(merchant_id, secret, ReqwestSession::new)
    }

    /// Creates a client from a [`PlategaConfig`], honouring its URL and timeout.
    pub fn from_config(config: &PlategaConfig) -> Self {
        let template = config.clone();
        Self::with_session_factory(
            config.merchant_id.clone(),
            config.secret.clone(),
            move || ReqwestSession::from_config(&template),
        )
    }
}

impl<S: Session> Platega<S> {
    /// Creates a client over a session owned by the caller.
    ///
    /// [`Platega::close`] leaves such a session untouched. Pass an `Arc<S>` to keep
    /// a handle of your own.
    pub fn with_session(merchant_id: impl Into<String>, secret: impl Into<String>, session: S) -> Self {
        Self {
            credentials: Credentials::new(merchant_id, secret),
            slot: SessionSlot::Injected(session),
        }
    }

    /// Creates a client that builds its own session with `factory` on first use,
    /// and again on the first use after each [`Platega::close`].
    pub fn with_session_factory<F>(merchant_id: impl Into<String>, secret: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            credentials: Credentials::new(merchant_id, secret),
            slot: SessionSlot::Owned {
                current: RwLock::new(None),
                factory: Box::new(factory),
            },
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether [`Platega::close`] is responsible for the session.
    pub fn owns_session(&self) -> bool {
        matches!(self.slot, SessionSlot::Owned { .. })
    }

    /// Whether a session currently exists. Always true for an injected session.
    pub async fn has_session(&self) -> bool {
        match &self.slot {
            SessionSlot::Owned { current, .. } => current.read().await.is_some(),
            SessionSlot::Injected(_) => true,
        }
    }

    /// Sends any method descriptor with the stored credentials.
    ///
    /// The result of the session is returned unchanged.
    pub async fn call<M: PlategaMethod>(&self, method: &M) -> Result<M::Response> {
        match &self.slot {
            SessionSlot::Injected(session) => session.make_request(&self.credentials, method).await,
            SessionSlot::Owned { current, factory } => {
                let session = Self::owned_session(current, factory).await;
                session.make_request(&self.credentials, method).await
            }
        }
    }

    async fn owned_session(current: &RwLock<Option<Arc<S>>>, factory: &SessionFactory<S>) -> Arc<S> {
        if let Some(session) = current.read().await.as_ref() {
            return Arc::clone(session);
        }
        let mut guard = current.write().await;
        Arc::clone(guard.get_or_insert_with(|| Arc::new(factory())))
    }

    /// Creates a payment and returns its redirect link and initial status.
    pub async fn create_transaction(&self, request: CreateTransaction) -> Result<CreateTransactionResponse> {
        self.call(&request).await
    }

    /// Fetches the current state of a transaction.
    pub async fn get_transaction_status(&self, transaction_id: Uuid) -> Result<TransactionStatusResponse> {
        self.call(&GetTransactionStatus::new(transaction_id)).await
    }

    /// Fetches the exchange rate for a payment method. The merchant id is taken
    /// from the client credentials.
    pub async fn get_rate(
        &self,
        payment_method: impl Into<u32>,
        currency_from: impl Into<String>,
        currency_to: impl Into<String>,
    ) -> Result<RateResponse> {
        let request = GetRate::new(
            self.credentials.merchant_id(),
            payment_method,
            currency_from,
            currency_to,
        );
        self.call(&request).await
    }

    /// Lists balance unlock operations, one page at a time.
    pub async fn get_conversions(&self, request: GetConversions) -> Result<ConversionsResponse> {
        self.call(&request).await
    }

    /// Closes the session if the client created it. Injected sessions are left
    /// open. Can be called any number of times.
    pub async fn close(&self) {
        if let SessionSlot::Owned { current, .. } = &self.slot {
            let session = current.write().await.take();
            if let Some(session) = session {
                session.close().await;
            }
        }
    }

    /// Runs `body` with the client, then closes it however `body` ends.
    ///
    /// The client is closed after an `Ok`, after an `Err`, and when `body` panics;
    /// in the last case the panic is resumed once the client is closed.
    ///
    /// ```rust,no_run
    /// use platega::Platega;
    /// use platega::types::methods::GetConversions;
    ///
    /// # async fn run() -> platega::Result<()> {
    /// let page = Platega::new("merchant-id", "secret")
    ///     .scope(async |client| client.get_conversions(GetConversions::new()).await)
    ///     .await?;
    /// # let _ = page;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scope<T>(self, body: impl AsyncFnOnce(&Self) -> T) -> T {
        let outcome = AssertUnwindSafe(body(&self)).catch_unwind().await;
        self.close().await;
        match outcome {
            Ok(value) => value,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl<S> Debug for Platega<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platega")
            .field("credentials", &self.credentials)
            .field("owns_session", &matches!(self.slot, SessionSlot::Owned { .. }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, NetworkError, PlategaError};
    use platega_types::proto::{PaymentDetails, PaymentMethod};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TID: &str = "12345678-1234-5678-1234-567812345678";

    #[derive(Debug, Clone, PartialEq)]
    struct Recorded {
        api_path: String,
        payload: Value,
        merchant_id: String,
        secret: String,
    }

    /// In-memory session that records every call and answers with a canned body.
    #[derive(Default)]
    struct MockSession {
        reply: Mutex<Option<std::result::Result<Value, PlategaError>>>,
        calls: Mutex<Vec<Recorded>>,
        closed: AtomicUsize,
    }

    impl MockSession {
        fn replying(body: Value) -> Self {
            let session = Self::default();
            *session.reply.lock().unwrap() = Some(Ok(body));
            session
        }

        fn failing(err: PlategaError) -> Self {
            let session = Self::default();
            *session.reply.lock().unwrap() = Some(Err(err));
            session
        }

        fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }

        fn close_count(&self) -> usize {
            self.closed.load(Ordering::SeqCst)
        }
    }

    impl Session for MockSession {
        async fn make_request<M: PlategaMethod>(
            &self,
            credentials: &Credentials,
            method: &M,
        ) -> Result<M::Response> {
            self.calls.lock().unwrap().push(Recorded {
                api_path: method.api_path(),
                payload: Value::Object(method.payload().unwrap()),
                merchant_id: credentials.merchant_id().to_string(),
                secret: credentials.secret().to_string(),
            });
            let reply = self.reply.lock().unwrap().take().unwrap_or_else(|| Ok(json!({})));
            let body = reply?;
            Ok(serde_json::from_value(body).unwrap())
        }

        async fn close(&self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn created_body() -> Value {
        json!({ "transactionId": TID, "status": "PENDING" })
    }

    fn owning_client(
        created: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<Arc<MockSession>>>>,
    ) -> Platega<Arc<MockSession>> {
        Platega::with_session_factory("m-1", "s-1", move || {
            created.fetch_add(1, Ordering::SeqCst);
            let session = Arc::new(MockSession::replying(created_body()));
            *last.lock().unwrap() = Some(Arc::clone(&session));
            session
        })
    }

    #[tokio::test]
    async fn test_call_forwards_credentials_and_descriptor() {
        let session = Arc::new(MockSession::replying(created_body()));
        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));

        let request = CreateTransaction::new(PaymentMethod::CardsRub, PaymentDetails::new(10.5, "RUB"))
            .with_description("order");
        let response = client.create_transaction(request).await.unwrap();
        assert_eq!(response.transaction_id, Uuid::parse_str(TID).unwrap());

        assert_eq!(
            session.calls(),
            vec![Recorded {
                api_path: "/transaction/process".to_string(),
                payload: json!({
                    "paymentMethod": 10,
                    "paymentDetails": { "amount": 10.5, "currency": "RUB" },
                    "description": "order"
                }),
                merchant_id: "m-1".to_string(),
                secret: "s-1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_get_transaction_status_uses_path() {
        let session = Arc::new(MockSession::replying(json!({ "status": "CANCELED" })));
        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));

        let response = client
            .get_transaction_status(Uuid::parse_str(TID).unwrap())
            .await
            .unwrap();
        assert!(response.status.unwrap().is_final());

        let call = &session.calls()[0];
        assert_eq!(call.api_path, format!("/transaction/{TID}"));
        assert_eq!(call.payload, json!({}));
    }

    #[tokio::test]
    async fn test_get_rate_fills_merchant_id() {
        let session = Arc::new(MockSession::replying(json!({ "rate": 92.5 })));
        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));

        let rate = client.get_rate(PaymentMethod::SbpQr, "RUB", "USDT").await.unwrap();
        assert_eq!(rate.rate, Some(92.5));
        assert_eq!(
            session.calls()[0].payload,
            json!({
                "merchantId": "m-1",
                "paymentMethod": 2,
                "currencyFrom": "RUB",
                "currencyTo": "USDT"
            })
        );
    }

    #[tokio::test]
    async fn test_get_conversions_forwards_paging() {
        let session = Arc::new(MockSession::replying(json!({ "content": [], "page": 3 })));
        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));

        let page = client
            .get_conversions(GetConversions::new().with_page(3).with_from("2024-01-01"))
            .await
            .unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(
            session.calls()[0].payload,
            json!({ "from": "2024-01-01", "page": 3, "size": 20 })
        );
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let err = PlategaError::from(ApiError::from_json("/transaction/process", 401, json!({ "message": "bad key" })));
        let session = MockSession::failing(err);
        let client = Platega::with_session("m-1", "s-1", session);

        let err = client
            .create_transaction(CreateTransaction::new(PaymentMethod::Crypto, PaymentDetails::new(1.0, "USDT")))
            .await
            .unwrap_err();
        let api = err.api_error().unwrap();
        assert!(api.is_unauthorized());
        assert_eq!(api.message, "bad key");
    }

    #[tokio::test]
    async fn test_injected_session_is_never_closed() {
        let session = Arc::new(MockSession::default());
        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));
        assert!(!client.owns_session());
        assert!(client.has_session().await);

        client.close().await;
        client.close().await;
        assert_eq!(session.close_count(), 0);

        let client = Platega::with_session("m-1", "s-1", Arc::clone(&session));
        client.scope(async |_| ()).await;
        assert_eq!(session.close_count(), 0);
    }

    #[tokio::test]
    async fn test_owned_session_is_lazy_and_closed() {
        let created = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let client = owning_client(Arc::clone(&created), Arc::clone(&last));

        assert!(client.owns_session());
        assert!(!client.has_session().await);
        assert_eq!(created.load(Ordering::SeqCst), 0);

        client.get_conversions(GetConversions::new()).await.unwrap();
        client.get_conversions(GetConversions::new()).await.unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert!(client.has_session().await);

        client.close().await;
        client.close().await;
        assert!(!client.has_session().await);
        let first = last.lock().unwrap().clone().unwrap();
        assert_eq!(first.close_count(), 1);

        client.get_conversions(GetConversions::new()).await.unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_scope_closes_on_error() {
        let created = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let client = owning_client(Arc::clone(&created), Arc::clone(&last));

        let result = client
            .scope(async |client| -> Result<()> {
                client.get_conversions(GetConversions::new()).await?;
                Err(NetworkError::new("refused").into())
            })
            .await;
        assert!(result.unwrap_err().is_network());
        assert_eq!(last.lock().unwrap().clone().unwrap().close_count(), 1);
    }

    #[tokio::test]
    async fn test_scope_closes_on_panic() {
        let created = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let client = owning_client(Arc::clone(&created), Arc::clone(&last));

        let outcome = AssertUnwindSafe(client.scope(async |client| {
            client.get_conversions(GetConversions::new()).await.unwrap();
            panic!("boom");
        }))
        .catch_unwind()
        .await;
        assert!(outcome.is_err());
        assert_eq!(last.lock().unwrap().clone().unwrap().close_count(), 1);
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_url_lazily() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/transaction/{TID}")))
            .and(header("X-MerchantId", "m-1"))
            .and(header("X-Secret", "s-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "PENDING" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = PlategaConfig::new("m-1", "s-1")
            .with_api_url(server.uri().parse().unwrap())
            .with_timeout_secs(5);
        let client = Platega::from_config(&config);
        assert!(client.owns_session());
        assert!(!client.has_session().await);

        let status = client
            .get_transaction_status(Uuid::parse_str(TID).unwrap())
            .await
            .unwrap();
        assert_eq!(status.status, Some(platega_types::proto::PaymentStatus::Pending));
        assert!(client.has_session().await);

        client.close().await;
        assert!(!client.has_session().await);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = Platega::new("m-1", "top-secret");
        let debug = format!("{client:?}");
        assert!(debug.contains("m-1"));
        assert!(!debug.contains("top-secret"));
    }
}
