//! Id → record lookup shared by the chain and relationship builders.

use crate::{
    transaction::Transaction,
    types::TransactionId,
};
use std::collections::HashMap;

/// Borrowing index over a record slice.
///
/// Ids are assumed unique. On collision the later record in input order
/// replaces the earlier one; no warning is raised.
#[derive(Debug, Default, Clone)]
pub struct TransactionIndex<'a> {
    by_id: HashMap<TransactionId, &'a Transaction>,
}

impl<'a> TransactionIndex<'a> {
    pub fn build(records: &'a [Transaction]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for tx in records {
            by_id.insert(tx.transaction_id, tx);
        }
        Self { by_id }
    }

    pub fn lookup(&self, id: TransactionId) -> Option<&'a Transaction> {
        self.by_id.get(&id).copied()
    }

    /// Resolve `metadata.related_transaction_id` of `tx`, if any.
    pub fn related(&self, tx: &Transaction) -> Option<&'a Transaction> {
        tx.metadata
            .related_transaction_id
            .and_then(|id| self.lookup(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
