use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::timestamp::ApiTimestamp;

/// A single balance-unlock (conversion) operation.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionItem {
    pub id: Option<i64>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: Option<ApiTimestamp>,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of `GET /transaction/balance-unlock-operations`.
///
/// One page of conversion operations. Missing counters decode as `0` and a
/// missing `content` as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionsResponse {
    pub content: Vec<ConversionItem>,
    #[serde(rename = "totalElements", alias = "total_elements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages", alias = "total_pages")]
    pub total_pages: u64,
    pub page: u64,
    pub size: u64,
    /// Fields not modelled by this record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConversionsResponse {
    /// Whether a page after this one exists.
    pub fn has_next_page(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}
