//! Wire format types for Platega API messages.
//!
//! # Key Types
//!
//! - [`PaymentMethod`] - Integer payment method identifier
//! - [`PaymentStatus`] - Transaction lifecycle status
//! - [`PaymentDetails`] - Amount and currency of a payment
//! - [`CreateTransactionResponse`] / [`TransactionStatusResponse`] - Transaction messages
//! - [`RateResponse`] - Exchange rate for a payment method
//! - [`ConversionsResponse`] / [`ConversionItem`] - Paginated balance-unlock operations
//! - [`CallbackPayload`] - Inbound webhook body sent by Platega to the merchant
//!
//! # Wire Format
//!
//! All records serialize to JSON using the API's camelCase names, including its
//! own spellings (`comission`, `payformSuccessUrl`). Deserialization also accepts the
//! snake_case field names.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

mod callback;
mod conversions;
mod rate;
mod transaction;

pub use callback::*;
pub use conversions::*;
pub use rate::*;
pub use transaction::*;

/// Payment method identifier, sent as an integer.
///
/// ```json
/// { "paymentMethod": 2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PaymentMethod {
    /// SBP (Faster Payments System) QR code.
    SbpQr = 2,
    /// Russian bank cards.
    CardsRub = 10,
    /// Card acquiring.
    CardAcquiring = 11,
    /// International card acquiring.
    InternationalAcquiring = 12,
    /// Cryptocurrency.
    Crypto = 13,
}

/// Error returned when an integer does not name a known [`PaymentMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub u8);

impl PaymentMethod {
    /// Returns the wire value of this payment method.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PaymentMethod {
    type Error = UnknownPaymentMethod;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PaymentMethod::SbpQr),
            10 => Ok(PaymentMethod::CardsRub),
            11 => Ok(PaymentMethod::CardAcquiring),
            12 => Ok(PaymentMethod::InternationalAcquiring),
            13 => Ok(PaymentMethod::Crypto),
            other => Err(UnknownPaymentMethod(other)),
        }
    }
}

impl From<PaymentMethod> for u8 {
    fn from(value: PaymentMethod) -> Self {
        value.as_u8()
    }
}

impl From<PaymentMethod> for u32 {
    fn from(value: PaymentMethod) -> Self {
        value.as_u8().into()
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Transaction payment status values returned by the Platega API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Canceled,
    Confirmed,
    Chargebacked,
}

impl PaymentStatus {
    /// Returns the wire representation, e.g. `"PENDING"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Canceled => "CANCELED",
            PaymentStatus::Confirmed => "CONFIRMED",
            PaymentStatus::Chargebacked => "CHARGEBACKED",
        }
    }

    /// Whether the transaction can no longer change status.
    pub fn is_final(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount and currency of a payment.
///
/// ```json
/// { "amount": 100.0, "currency": "RUB" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: f64,
    pub currency: String,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentDetails {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            extra: serde_json::Map::new(),
        }
    }
}
