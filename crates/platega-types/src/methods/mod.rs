//! Method descriptors: one value type per Platega API operation.
//!
//! A descriptor carries the request payload and, through [`PlategaMethod`], the
//! fixed metadata of the call: the path template, the HTTP verb, and the response
//! type to decode into. Building a descriptor never performs I/O.
//!
//! | Descriptor | Verb | Path | Response |
//! |---|---|---|---|
//! | [`CreateTransaction`] | `POST` | `/transaction/process` | [`CreateTransactionResponse`](crate::proto::CreateTransactionResponse) |
//! | [`GetTransactionStatus`] | `GET` | `/transaction/{transaction_id}` | [`TransactionStatusResponse`](crate::proto::TransactionStatusResponse) |
//! | [`GetRate`] | `GET` | `/rates/payment_method_rate` | [`RateResponse`](crate::proto::RateResponse) |
//! | [`GetConversions`] | `GET` | `/transaction/balance-unlock-operations` | [`ConversionsResponse`](crate::proto::ConversionsResponse) |

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

mod create_transaction;
mod get_conversions;
mod get_rate;
mod get_transaction_status;

pub use create_transaction::*;
pub use get_conversions::*;
pub use get_rate::*;
pub use get_transaction_status::*;

/// HTTP verb of an API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Payload is sent as query parameters.
    Get,
    /// Payload is sent as a JSON body.
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload field that is substituted into the path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// Internal (Rust) field name, as written in the `{...}` placeholder.
    pub field: &'static str,
    /// Wire name of the same field. It is removed from the payload once it has been
    /// placed into the path.
    pub alias: &'static str,
    /// Value rendered into the path.
    pub value: String,
}

/// Trait implemented by every Platega API operation.
///
/// The response type is an associated type, so a dispatcher generic over `M`
/// returns exactly `M::Response` without any runtime type lookup.
///
/// Serializing the descriptor with serde produces its wire keys (external
/// aliases) with unset optional fields omitted.
pub trait PlategaMethod: Serialize + Send + Sync {
    /// Record the successful response body decodes into.
    type Response: DeserializeOwned + Send;

    /// Path template, possibly containing `{field}` placeholders.
    const API_METHOD: &'static str;

    /// HTTP verb used for the call.
    const HTTP_METHOD: HttpMethod;

    /// Payload fields that feed the path template, keyed by internal name.
    fn path_params(&self) -> Vec<PathParam> {
        Vec::new()
    }

    /// Returns the concrete request path with every placeholder resolved.
    ///
    /// # Panics
    ///
    /// Panics if the template names a field that [`Self::path_params`] does not
    /// provide. That is a defect in the descriptor, not a runtime condition.
    fn api_path(&self) -> String {
        resolve_path(Self::API_METHOD, &self.path_params())
    }

    /// Returns the payload as a JSON object keyed by wire name, without unset
    /// optional fields and without the fields consumed by the path.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor does not serialize into a JSON object.
    fn payload(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut map = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "method payload must serialize to a JSON object, got {other}"
                )));
            }
        };
        for param in self.path_params() {
            map.remove(param.alias);
        }
        Ok(map)
    }
}

/// Substitutes `{field}` placeholders in `template` with the matching [`PathParam`].
///
/// # Panics
///
/// Panics on a placeholder with no matching parameter, or on an unterminated `{`.
pub fn resolve_path(template: &str, params: &[PathParam]) -> String {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        path.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .unwrap_or_else(|| panic!("unterminated placeholder in path template {template:?}"));
        let field = &after[..end];
        let param = params
            .iter()
            .find(|param| param.field == field)
            .unwrap_or_else(|| {
                panic!("unresolved placeholder {{{field}}} in path template {template:?}")
            });
        path.push_str(&param.value);
        rest = &after[end + 1..];
    }
    path.push_str(rest);
    path
}

/// Flattens a payload object into query parameters.
///
/// Strings are used verbatim, other scalars as their JSON text, nested arrays and
/// objects as compact JSON. `null` values are skipped.
pub fn query_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param(field: &'static str, value: &str) -> PathParam {
        PathParam {
            field,
            alias: field,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_resolve_path_without_placeholders() {
        assert_eq!(resolve_path("/rates/payment_method_rate", &[]), "/rates/payment_method_rate");
    }

    #[test]
    fn test_resolve_path_multiple_placeholders() {
        let path = resolve_path(
            "/a/{first}/b/{second}",
            &[param("second", "2"), param("first", "1")],
        );
        assert_eq!(path, "/a/1/b/2");
    }

    #[test]
    #[should_panic(expected = "unresolved placeholder {missing}")]
    fn test_resolve_path_missing_param_panics() {
        resolve_path("/transaction/{missing}", &[param("other", "x")]);
    }

    #[test]
    #[should_panic(expected = "unterminated placeholder")]
    fn test_resolve_path_unterminated_panics() {
        resolve_path("/transaction/{oops", &[]);
    }

    #[test]
    fn test_query_pairs() {
        let payload = json!({
            "merchantId": "m-1",
            "paymentMethod": 2,
            "flag": true,
            "skipped": null
        });
        let mut pairs = query_pairs(payload.as_object().unwrap());
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("flag".to_string(), "true".to_string()),
                ("merchantId".to_string(), "m-1".to_string()),
                ("paymentMethod".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
