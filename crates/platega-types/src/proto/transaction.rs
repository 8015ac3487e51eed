use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::proto::{PaymentDetails, PaymentStatus};

/// Payment details as echoed back by `POST /transaction/process`.
///
/// The API returns either the structured object or a preformatted string,
/// depending on the payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentDetailsValue {
    Details(PaymentDetails),
    Text(String),
}

/// Response of `POST /transaction/process`.
///
/// # Example
///
/// ```json
/// {
///   "transactionId": "12345678-1234-5678-1234-567812345678",
///   "status": "PENDING",
///   "redirect": "https://pay.platega.io/..."
/// }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: Option<String>,
    #[serde(rename = "transactionId", alias = "transaction_id")]
    pub transaction_id: Uuid,
    /// Payment page the customer should be sent to.
    pub redirect: Option<String>,
    #[serde(rename = "return", alias = "return_url")]
    pub return_url: Option<String>,
    #[serde(rename = "paymentDetails", alias = "payment_details")]
    pub payment_details: Option<PaymentDetailsValue>,
    pub status: PaymentStatus,
    #[serde(rename = "expiresIn", alias = "expires_in")]
    pub expires_in: Option<String>,
    #[serde(rename = "merchantId", alias = "merchant_id")]
    pub merchant_id: Option<Uuid>,
    #[serde(rename = "usdtRate", alias = "usdt_rate")]
    pub usdt_rate: Option<f64>,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of `GET /transaction/{id}`.
///
/// Every field is optional: the API omits whatever does not apply to the
/// transaction's payment method or current status.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionStatusResponse {
    pub id: Option<Uuid>,
    pub status: Option<PaymentStatus>,
    #[serde(rename = "paymentDetails", alias = "payment_details")]
    pub payment_details: Option<PaymentDetails>,
    #[serde(rename = "merchantName", alias = "merchant_name")]
    pub merchant_name: Option<String>,
    #[serde(rename = "merchantId", alias = "merchant_id")]
    pub merchant_id: Option<Uuid>,
    #[serde(rename = "comission", alias = "commission")]
    pub commission: Option<f64>,
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: Option<String>,
    #[serde(rename = "expiresIn", alias = "expires_in")]
    pub expires_in: Option<String>,
    #[serde(rename = "return", alias = "return_url")]
    pub return_url: Option<String>,
    #[serde(rename = "comissionUsdt", alias = "commission_usdt")]
    pub commission_usdt: Option<f64>,
    #[serde(rename = "amountUsdt", alias = "amount_usdt")]
    pub amount_usdt: Option<f64>,
    pub qr: Option<String>,
    #[serde(rename = "payformSuccessUrl", alias = "pay_form_success_url")]
    pub pay_form_success_url: Option<String>,
    pub payload: Option<String>,
    #[serde(rename = "comissionType", alias = "commission_type")]
    pub commission_type: Option<i32>,
    #[serde(rename = "externalId", alias = "external_id")]
    pub external_id: Option<String>,
    pub description: Option<String>,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
