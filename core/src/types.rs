//! Shared primitive types used across the ledger graph.

/// Identifier of a customer as it appears on source records.
pub type CustomerId = i64;

/// Identifier of a single transaction record. Intended to be unique,
/// but never validated as such.
pub type TransactionId = i64;
