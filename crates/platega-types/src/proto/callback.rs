use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

/// Body of the webhook Platega sends to the merchant when a transaction changes status.
///
/// The client never dispatches this message; applications receive it on their own
/// HTTP endpoint and decode it with [`CallbackPayload::from_slice`].
///
/// # Example
///
/// ```json
/// {
///   "id": "12345678-1234-5678-1234-567812345678",
///   "amount": 100.0,
///   "currency": "RUB",
///   "status": "CONFIRMED",
///   "paymentMethod": 2,
///   "payload": "order-42"
/// }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackPayload {
    pub id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: u32,
    /// Merchant-supplied value passed through from transaction creation.
    pub payload: Option<String>,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CallbackPayload {
    /// Decodes a webhook request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
