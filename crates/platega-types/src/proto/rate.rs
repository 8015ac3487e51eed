use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::timestamp::ApiTimestamp;

/// Response of `GET /rates/payment_method_rate`.
///
/// # Example
///
/// ```json
/// {
///   "paymentMethod": 2,
///   "currencyFrom": "RUB",
///   "currencyTo": "USDT",
///   "rate": 0.0105,
///   "updatedAt": "2024-05-01T12:00:00Z"
/// }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: Option<u32>,
    #[serde(rename = "currencyFrom", alias = "currency_from")]
    pub currency_from: Option<String>,
    #[serde(rename = "currencyTo", alias = "currency_to")]
    pub currency_to: Option<String>,
    pub rate: Option<f64>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: Option<ApiTimestamp>,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
