use serde::{Deserialize, Serialize};

use crate::methods::{HttpMethod, PlategaMethod};
use crate::proto::RateResponse;

/// `GET /rates/payment_method_rate`: current exchange rate for a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRate {
    #[serde(rename = "merchantId", alias = "merchant_id")]
    pub merchant_id: String,
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: u32,
    /// Source currency code, e.g. `"RUB"`.
    #[serde(rename = "currencyFrom", alias = "currency_from")]
    pub currency_from: String,
    /// Target currency code, e.g. `"USDT"`.
    #[serde(rename = "currencyTo", alias = "currency_to")]
    pub currency_to: String,
}

impl GetRate {
    pub fn new(
        merchant_id: impl Into<String>,
        payment_method: impl Into<u32>,
        currency_from: impl Into<String>,
        currency_to: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            payment_method: payment_method.into(),
            currency_from: currency_from.into(),
            currency_to: currency_to.into(),
        }
    }
}

impl PlategaMethod for GetRate {
    type Response = RateResponse;
    const API_METHOD: &'static str = "/rates/payment_method_rate";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::query_pairs;
    use crate::proto::PaymentMethod;
    use serde_json::json;

    #[test]
    fn test_payload_keys() {
        let method = GetRate::new("merchant-1", PaymentMethod::SbpQr, "RUB", "USDT");
        assert_eq!(
            serde_json::Value::Object(method.payload().unwrap()),
            json!({
                "merchantId": "merchant-1",
                "paymentMethod": 2,
                "currencyFrom": "RUB",
                "currencyTo": "USDT"
            })
        );
    }

    #[test]
    fn test_query_pairs() {
        let method = GetRate::new("merchant-1", 10u32, "RUB", "USDT");
        let mut pairs = query_pairs(&method.payload().unwrap());
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("currencyFrom".to_string(), "RUB".to_string()),
                ("currencyTo".to_string(), "USDT".to_string()),
                ("merchantId".to_string(), "merchant-1".to_string()),
                ("paymentMethod".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(method.api_path(), "/rates/payment_method_rate");
    }
}
