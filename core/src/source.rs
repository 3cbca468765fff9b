//! Loading record lists from local JSON files.
//!
//! Records are decoded one at a time. A record that fails to decode, or
//! carries a date that does not parse, is dropped with a warning; it never
//! aborts the load. Only an unreadable file or a malformed document fails.

use crate::{
    error::{LedgerError, LedgerResult},
    transaction::{parse_timestamp_millis, Transaction},
};
use serde_json::Value;
use std::path::Path;

/// Decode a JSON document into records. A non-array document yields no records.
pub fn parse_records(json: &str) -> LedgerResult<Vec<Transaction>> {
    let document: Value = serde_json::from_str(json)?;
    Ok(records_from_value(document))
}

/// Filter an already-parsed document down to its valid records.
pub fn records_from_value(document: Value) -> Vec<Transaction> {
    let Value::Array(items) = document else {
        log::warn!("Record source is not a JSON array; no records loaded");
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<Transaction> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| decode_record(position, item))
        .collect();

    if records.len() < total {
        log::warn!("{} of {total} records failed validation", total - records.len());
    }
    records
}

fn decode_record(position: usize, item: Value) -> Option<Transaction> {
    let tx: Transaction = match serde_json::from_value(item) {
        Ok(tx) => tx,
        Err(e) => {
            log::warn!("Transaction at position {position} failed validation: {e}");
            return None;
        }
    };
    if parse_timestamp_millis(&tx.transaction_date).is_none() {
        log::warn!(
            "Transaction {} failed validation: invalid date {:?}, must be ISO 8601",
            tx.transaction_id,
            tx.transaction_date
        );
        return None;
    }
    Some(tx)
}

pub fn load_records(path: impl AsRef<Path>) -> LedgerResult<Vec<Transaction>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| LedgerError::InvalidRecordSource {
        path:   path.display().to_string(),
        reason: e.to_string(),
    })?;
    let records = parse_records(&content).map_err(|e| LedgerError::InvalidRecordSource {
        path:   path.display().to_string(),
        reason: e.to_string(),
    })?;
    log::info!("Fetched {} transactions from {}", records.len(), path.display());
    Ok(records)
}

/// Load `primary`, falling back to the last-known-good `fallback` copy.
pub fn load_with_fallback(
    primary: impl AsRef<Path>,
    fallback: impl AsRef<Path>,
) -> LedgerResult<Vec<Transaction>> {
    match load_records(primary) {
        Ok(records) => Ok(records),
        Err(e) => {
            log::warn!("{e}. Falling back to {}", fallback.as_ref().display());
            load_records(fallback)
        }
    }
}
