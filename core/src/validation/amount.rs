//! Structural and numeric consistency of a chain's members.

use super::ChainValidator;
use crate::{
    index::TransactionIndex,
    transaction::Transaction,
};

/// Every FEE member must point at a record present in `index`.
pub fn fees_reference_known_parents(members: &[&Transaction], index: &TransactionIndex<'_>) -> bool {
    members
        .iter()
        .filter(|tx| tx.is_fee())
        .all(|fee| index.related(fee).is_some())
}

/// Adjacent non-FEE members of the same type must carry equal amounts.
/// Only neighbours are compared, not every pair of the same type.
pub fn adjacent_amounts_agree(members: &[&Transaction]) -> bool {
    let non_fee: Vec<&Transaction> = members.iter().copied().filter(|tx| !tx.is_fee()).collect();
    non_fee.windows(2).all(|pair| {
        let (prev, curr) = (pair[0], pair[1]);
        prev.transaction_type != curr.transaction_type || prev.amount == curr.amount
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AmountConsistencyValidator;

impl ChainValidator for AmountConsistencyValidator {
    fn name(&self) -> &'static str {
        "amount_consistency"
    }

    fn validate(&self, members: &[&Transaction], index: &TransactionIndex<'_>) -> bool {
        fees_reference_known_parents(members, index) && adjacent_amounts_agree(members)
    }
}
