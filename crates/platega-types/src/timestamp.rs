//! Datetime type for Platega timestamps.
//!
//! The API is not consistent about offsets: some endpoints return RFC 3339
//! strings (`2024-05-01T12:00:00Z`, `2024-05-01T15:00:00+03:00`), others return
//! naive ISO-8601 datetimes (`2024-05-01T12:00:00.123`). [`ApiTimestamp`] accepts
//! both and normalizes to UTC; naive values are taken to be in UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A point in time reported by the Platega API, normalized to UTC.
///
/// # Serialization
///
/// Serialized as an RFC 3339 string with a `Z` suffix:
///
/// ```json
/// "2024-05-01T12:00:00Z"
/// ```
///
/// # Example
///
/// ```
/// use platega_types::timestamp::ApiTimestamp;
///
/// let ts: ApiTimestamp = "2024-05-01T15:00:00+03:00".parse().unwrap();
/// assert_eq!(ts.to_string(), "2024-05-01T12:00:00Z");
///
/// let naive: ApiTimestamp = "2024-05-01T12:00:00".parse().unwrap();
/// assert_eq!(naive, ts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct ApiTimestamp(DateTime<Utc>);

/// Error returned when a string is neither RFC 3339 nor a naive ISO-8601 datetime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid timestamp: {0}")]
pub struct ApiTimestampParseError(String);

impl ApiTimestamp {
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for ApiTimestamp {
    type Err = ApiTimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(datetime.with_timezone(&Utc)));
        }
        NaiveDateTime::from_str(s)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| ApiTimestampParseError(s.to_string()))
    }
}

impl From<DateTime<Utc>> for ApiTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Display for ApiTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for ApiTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ApiTimestamp>().map_err(serde::de::Error::custom)
    }
}
