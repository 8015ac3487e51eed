use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::methods::{HttpMethod, PlategaMethod};
use crate::proto::ConversionsResponse;

/// `GET /transaction/balance-unlock-operations`: one page of balance-unlock (conversion)
/// operations.
///
/// Defaults to the first page of 20 items with no date filter.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConversions {
    /// Start of the date filter, ISO-8601.
    #[serde(rename = "from", alias = "from_date")]
    pub from_date: Option<String>,
    /// End of the date filter, ISO-8601.
    #[serde(rename = "to", alias = "to_date")]
    pub to_date: Option<String>,
    /// Zero-based page number.
    #[serde(default)]
    pub page: u32,
    #[serde(default = "GetConversions::default_size")]
    pub size: u32,
}

impl GetConversions {
    pub const DEFAULT_SIZE: u32 = 20;

    fn default_size() -> u32 {
        Self::DEFAULT_SIZE
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from_date: impl Into<String>) -> Self {
        self.from_date = Some(from_date.into());
        self
    }

    pub fn with_to(mut self, to_date: impl Into<String>) -> Self {
        self.to_date = Some(to_date.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

impl Default for GetConversions {
    fn default() -> Self {
        Self {
            from_date: None,
            to_date: None,
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

impl PlategaMethod for GetConversions {
    type Response = ConversionsResponse;
    const API_METHOD: &'static str = "/transaction/balance-unlock-operations";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
}
