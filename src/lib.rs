#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async client for the [Platega](https://platega.io) payment API.
//!
//! # Overview
//!
//! Each API operation is a method descriptor from [`types::methods`]: a value
//! holding the request payload whose [`PlategaMethod`](types::methods::PlategaMethod)
//! impl fixes the path, the HTTP verb and the response type at compile time. A
//! [`Session`](session::Session) sends descriptors, and the [`Platega`] client binds
//! a session to the merchant credentials.
//!
//! # Modules
//!
//! - [`client`] - The [`Platega`] facade with one method per API operation
//! - [`error`] - [`PlategaError`] and its network, decode and API variants
//! - [`session`] - The [`Session`](session::Session) trait and the `reqwest` implementation
//! - [`types`] - Re-export of `platega-types`: wire records, descriptors, configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use platega::Platega;
//! use platega::types::proto::PaymentMethod;
//!
//! # async fn run() -> platega::Result<()> {
//! let rate = Platega::new("merchant-id", "secret")
//!     .scope(async |client| client.get_rate(PaymentMethod::SbpQr, "RUB", "USDT").await)
//!     .await?;
//! println!("{:?}", rate.rate);
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` spans and events for every request

pub mod client;
pub mod error;
pub mod session;

pub use platega_types as types;

pub use client::Platega;
pub use error::{ApiError, ApiErrorKind, DecodeError, ErrorBody, NetworkError, PlategaError, Result};
pub use session::{Credentials, ReqwestSession, Session};
