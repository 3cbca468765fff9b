//! Per-customer transaction chains.
//!
//! A chain collapses every record sharing a grouping key into one
//! aggregate with a most-recent-first timeline. The grouping key is
//! `(customer_id, authorization_code)`, except that a FEE whose related
//! transaction resolves is filed under its parent's key.
//!
//! Grouping is a partition: each input record lands in exactly one group.
//! Chains are emitted in first-seen group order.

use crate::{
    index::TransactionIndex,
    transaction::{Transaction, TransactionMetadata, TransactionStatus, TransactionType},
    types::{CustomerId, TransactionId},
    validation::ChainValidator,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub created_at: String,
    pub status:     TransactionStatus,
    pub amount:     f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionChain {
    pub created_at:         String,
    pub updated_at:         String,
    pub transaction_id:     TransactionId,
    pub authorization_code: String,
    pub status:             TransactionStatus,
    pub description:        String,
    pub transaction_type:   TransactionType,
    pub metadata:           TransactionMetadata,
    /// Most recent entry first.
    pub timeline:           Vec<TimelineEntry>,
}

/// `(customer_id, authorization_code)` of the group a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey<'a> {
    pub customer_id:        CustomerId,
    pub authorization_code: &'a str,
}

impl<'a> GroupKey<'a> {
    fn of(tx: &'a Transaction) -> Self {
        Self {
            customer_id:        tx.customer_id,
            authorization_code: &tx.authorization_code,
        }
    }

    /// The key `tx` is filed under, after fee reparenting.
    pub fn for_record(tx: &'a Transaction, index: &TransactionIndex<'a>) -> Self {
        if tx.is_fee() {
            if let Some(parent) = index.related(tx) {
                return Self::of(parent);
            }
        }
        Self::of(tx)
    }
}

/// Per-customer chains in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct CustomerChains {
    pub by_customer: HashMap<CustomerId, Vec<TransactionChain>>,
    /// Groups dropped by an active validator.
    pub rejected:    usize,
}

impl CustomerChains {
    pub fn chain_count(&self) -> usize {
        self.by_customer.values().map(Vec::len).sum()
    }
}

/// Partition `records` into groups, preserving first-seen group order
/// and input order within each group.
pub fn group_records<'a>(
    records: &'a [Transaction],
    index: &TransactionIndex<'a>,
) -> Vec<(GroupKey<'a>, Vec<&'a Transaction>)> {
    let mut slot_of: HashMap<GroupKey<'a>, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey<'a>, Vec<&'a Transaction>)> = Vec::new();

    for tx in records {
        let key = GroupKey::for_record(tx, index);
        let slot = *slot_of.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(tx);
    }
    groups
}

/// Sort members chronologically (stable; unparsable dates sort first).
pub fn chronological(mut members: Vec<&Transaction>) -> Vec<&Transaction> {
    members.sort_by_key(|tx| tx.timestamp_millis());
    members
}

/// Aggregate one chronologically sorted group. Returns None for an empty group.
pub fn aggregate(sorted: &[&Transaction]) -> Option<TransactionChain> {
    let first = sorted.first()?;
    let last = sorted.last()?;

    let timeline = sorted
        .iter()
        .rev()
        .map(|tx| TimelineEntry {
            created_at: tx.transaction_date.clone(),
            status:     tx.transaction_status,
            amount:     tx.amount,
        })
        .collect();

    Some(TransactionChain {
        created_at:         first.transaction_date.clone(),
        updated_at:         last.transaction_date.clone(),
        transaction_id:     first.transaction_id,
        authorization_code: first.authorization_code.clone(),
        status:             last.transaction_status,
        description:        first.description.clone(),
        transaction_type:   first.transaction_type,
        metadata:           last.metadata.clone(),
        timeline,
    })
}

/// Build every customer's chains.
///
/// With an empty `validators` slice nothing is filtered. Otherwise a group
/// is kept only if every validator accepts its chronological members.
pub fn build_customer_chains<'a>(
    records: &'a [Transaction],
    index: &TransactionIndex<'a>,
    validators: &[Box<dyn ChainValidator>],
) -> CustomerChains {
    let mut out = CustomerChains::default();

    for (key, members) in group_records(records, index) {
        let sorted = chronological(members);

        if let Some(failed) = validators.iter().find(|v| !v.validate(&sorted, index)) {
            log::warn!(
                "Invalid transaction chain for customer {}, auth code {} ({} rejected it)",
                key.customer_id,
                key.authorization_code,
                failed.name()
            );
            out.rejected += 1;
            continue;
        }

        if let Some(chain) = aggregate(&sorted) {
            out.by_customer.entry(key.customer_id).or_default().push(chain);
        }
    }

    log::debug!(
        "chains: {} chains across {} customers, {} rejected",
        out.chain_count(),
        out.by_customer.len(),
        out.rejected
    );
    out
}
