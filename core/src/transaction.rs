//! Source transaction records as supplied by the record source.
//!
//! Records are immutable once they enter the core. Field names follow the
//! upstream JSON format (camelCase fields, SCREAMING_SNAKE enum values).

use crate::types::{CustomerId, TransactionId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    AchIncoming,
    Pos,
    WireOutgoing,
    Fee,
    WireIncoming,
    #[serde(rename = "P2P_SEND")]
    P2pSend,
    #[serde(rename = "P2P_RECEIVE")]
    P2pReceive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Settled,
    Returned,
    Declined,
    Canceled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending  => "PENDING",
            Self::Settled  => "SETTLED",
            Self::Returned => "RETURNED",
            Self::Declined => "DECLINED",
            Self::Canceled => "CANCELED",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_transaction_id: Option<TransactionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id:     TransactionId,
    pub authorization_code: String,
    pub transaction_date:   String,
    pub customer_id:        CustomerId,
    pub transaction_type:   TransactionType,
    pub transaction_status: TransactionStatus,
    pub description:        String,
    pub amount:             f64,
    pub metadata:           TransactionMetadata,
}

impl Transaction {
    /// Milliseconds since the Unix epoch for `transaction_date`.
    /// Unparsable dates map to 0 so they sort first.
    pub fn timestamp_millis(&self) -> i64 {
        parse_timestamp_millis(&self.transaction_date).unwrap_or(0)
    }

    pub fn is_fee(&self) -> bool {
        self.transaction_type == TransactionType::Fee
    }

    /// The device id, if present and non-empty.
    pub fn device_id(&self) -> Option<&str> {
        self.metadata.device_id.as_deref().filter(|d| !d.is_empty())
    }
}

/// Date-time layouts carrying a UTC designator or offset. `%#z` takes
/// `Z`, `+hh`, `+hhmm` and `+hh:mm`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 date string into epoch milliseconds.
///
/// Accepts RFC 3339 timestamps, date-times with minute or second precision
/// (with or without an offset, basic or extended), and the calendar forms
/// `YYYY-MM-DD`, `YYYY-MM` and `YYYY` (midnight UTC on the first day).
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.timestamp_millis());
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc().timestamp_millis());
    }
    parse_calendar_date(raw)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let (year, month) = match raw.split_once('-') {
        Some((y, m)) if m.len() == 2 => (y, m.parse::<u32>().ok()?),
        Some(_) => return None,
        None => (raw, 1),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}
