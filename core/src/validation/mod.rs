//! Optional chain validators.
//!
//! RULE: chain construction never calls a validator on its own.
//! Validators run only when the caller selects a `ChainFilter`
//! other than `None`, and their verdict is a plain bool.

pub mod amount;
pub mod status;

use crate::{
    config::ChainFilter,
    index::TransactionIndex,
    transaction::Transaction,
};

pub use amount::AmountConsistencyValidator;
pub use status::StatusTransitionValidator;

/// The contract every chain validator fulfils.
pub trait ChainValidator: Send + Sync {
    /// Stable name used in log lines.
    fn name(&self) -> &'static str;

    /// Judge one group of chain members.
    ///
    /// - `members`: the group in chronological (ascending) order
    /// - `index`:   the index over the full record list
    fn validate(&self, members: &[&Transaction], index: &TransactionIndex<'_>) -> bool;
}

/// Instantiate the validators a filter selects, in evaluation order.
pub fn validators_for(filter: ChainFilter) -> Vec<Box<dyn ChainValidator>> {
    match filter {
        ChainFilter::None => Vec::new(),
        ChainFilter::StatusTransitions => vec![Box::new(StatusTransitionValidator)],
        ChainFilter::AmountConsistency => vec![Box::new(AmountConsistencyValidator)],
        ChainFilter::All => vec![
            Box::new(StatusTransitionValidator),
            Box::new(AmountConsistencyValidator),
        ],
    }
}
