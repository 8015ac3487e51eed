use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::methods::{HttpMethod, PathParam, PlategaMethod};
use crate::proto::TransactionStatusResponse;

/// `GET /transaction/{transaction_id}`: fetches the current state of a transaction.
///
/// The transaction id goes into the path only; it is not repeated as a query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionStatus {
    #[serde(rename = "transactionId", alias = "transaction_id")]
    pub transaction_id: Uuid,
}

impl GetTransactionStatus {
    pub fn new(transaction_id: Uuid) -> Self {
        Self { transaction_id }
    }

    /// Builds the descriptor from a textual transaction id.
    ///
    /// # Errors
    ///
    /// Returns [`uuid::Error`] if `transaction_id` is not a valid UUID.
    pub fn parse(transaction_id: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(transaction_id).map(Self::new)
    }
}

impl FromStr for GetTransactionStatus {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GetTransactionStatus::parse(s)
    }
}

impl From<Uuid> for GetTransactionStatus {
    fn from(value: Uuid) -> Self {
        Self::new(value)
    }
}

impl PlategaMethod for GetTransactionStatus {
    type Response = TransactionStatusResponse;
    const API_METHOD: &'static str = "/transaction/{transaction_id}";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn path_params(&self) -> Vec<PathParam> {
        vec![PathParam {
            field: "transaction_id",
            alias: "transactionId",
            value: self.transaction_id.to_string(),
        }]
    }
}
