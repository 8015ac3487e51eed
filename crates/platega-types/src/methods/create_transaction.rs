use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::methods::{HttpMethod, PlategaMethod};
use crate::proto::{CreateTransactionResponse, PaymentDetails, PaymentMethod};

/// `POST /transaction/process`: creates a new payment transaction.
///
/// ```
/// use platega_types::methods::CreateTransaction;
/// use platega_types::proto::{PaymentDetails, PaymentMethod};
///
/// let method = CreateTransaction::new(PaymentMethod::SbpQr, PaymentDetails::new(100.0, "RUB"))
///     .with_description("Order #42")
///     .with_return_url("https://shop.example/ok");
/// let body = serde_json::to_value(&method).unwrap();
/// assert_eq!(body["paymentMethod"], 2);
/// assert_eq!(body["return"], "https://shop.example/ok");
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransaction {
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "paymentDetails", alias = "payment_details")]
    pub payment_details: PaymentDetails,
    pub description: Option<String>,
    /// Where the customer lands after a successful payment.
    #[serde(rename = "return", alias = "return_url")]
    pub return_url: Option<String>,
    /// Where the customer lands after a failed payment.
    #[serde(rename = "failedUrl", alias = "failed_url")]
    pub failed_url: Option<String>,
    /// Arbitrary merchant value, echoed back in the callback.
    pub payload: Option<String>,
}

impl CreateTransaction {
    pub fn new(payment_method: PaymentMethod, payment_details: PaymentDetails) -> Self {
        Self {
            payment_method,
            payment_details,
            description: None,
            return_url: None,
            failed_url: None,
            payload: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_failed_url(mut self, failed_url: impl Into<String>) -> Self {
        self.failed_url = Some(failed_url.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

impl PlategaMethod for CreateTransaction {
    type Response = CreateTransactionResponse;
    const API_METHOD: &'static str = "/transaction/process";
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_minimal() {
        let method = CreateTransaction::new(PaymentMethod::SbpQr, PaymentDetails::new(100.0, "RUB"));
        let payload = method.payload().unwrap();
        assert_eq!(
            serde_json::Value::Object(payload),
            json!({
                "paymentMethod": 2,
                "paymentDetails": { "amount": 100.0, "currency": "RUB" }
            })
        );
    }

    #[test]
    fn test_payload_full_uses_aliases() {
        let method = CreateTransaction::new(PaymentMethod::Crypto, PaymentDetails::new(5.0, "USDT"))
            .with_description("Order #42")
            .with_return_url("https://shop.example/ok")
            .with_failed_url("https://shop.example/fail")
            .with_payload("order-42");
        let payload = method.payload().unwrap();
        let mut keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["description", "failedUrl", "payload", "paymentDetails", "paymentMethod", "return"]
        );
        assert_eq!(payload["failedUrl"], json!("https://shop.example/fail"));
        assert_eq!(payload["paymentMethod"], json!(13));
    }

    #[test]
    fn test_metadata() {
        let method = CreateTransaction::new(PaymentMethod::SbpQr, PaymentDetails::new(1.0, "RUB"));
        assert_eq!(method.api_path(), "/transaction/process");
        assert_eq!(CreateTransaction::HTTP_METHOD, HttpMethod::Post);
    }

    #[test]
    fn test_decodes_request_record() {
        let method: CreateTransaction = serde_json::from_value(json!({
            "paymentMethod": 2,
            "paymentDetails": { "amount": 250.0, "currency": "RUB" },
            "description": "Order #7",
            "return": "https://shop.example/ok",
            "failedUrl": "https://shop.example/fail",
            "payload": "order-7"
        }))
        .unwrap();
        assert_eq!(
            method,
            CreateTransaction::new(PaymentMethod::SbpQr, PaymentDetails::new(250.0, "RUB"))
                .with_description("Order #7")
                .with_return_url("https://shop.example/ok")
                .with_failed_url("https://shop.example/fail")
                .with_payload("order-7")
        );
    }

    #[test]
    fn test_unknown_payment_method_rejected() {
        let result: Result<CreateTransaction, _> = serde_json::from_value(json!({
            "paymentMethod": 7,
            "paymentDetails": { "amount": 1.0, "currency": "RUB" }
        }));
        assert!(result.is_err());
    }
}
