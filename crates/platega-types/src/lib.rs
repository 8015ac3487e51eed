#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Platega payment API.
//!
//! This crate holds the data side of the Platega client: the JSON records the API
//! accepts and returns, and one method descriptor per API operation. It performs
//! no I/O. The runtime side (transport, error mapping, the client facade) lives in
//! the `platega` crate.
//!
//! # Modules
//!
//! - [`config`] - Client connection settings (credentials, API URL, timeout)
//! - [`methods`] - The [`PlategaMethod`](methods::PlategaMethod) descriptor trait and the four API operations
//! - [`proto`] - Wire format records and enums (transactions, rates, conversions, callbacks)
//! - [`timestamp`] - Datetime type used by `updatedAt` and `createdAt` fields
//!
//! # Wire Format
//!
//! Every record keeps its Rust field name as the internal name and declares the
//! camelCase wire name with `#[serde(rename)]`. Unset optional fields are omitted
//! on output, and response records keep unknown incoming keys in an `extra` map so
//! additions to the API never break decoding.

pub mod config;
pub mod methods;
pub mod proto;
pub mod timestamp;
