//! AggregationService: the read-only query facade.
//!
//! BUILD ORDER (fixed):
//!   1. TransactionIndex over the supplied records
//!   2. Relationship graph (P2P links, then shared devices)
//!   3. Customer chains, filtered only if the config selects validators
//!
//! After `new` returns nothing is mutated. A fresh record list means a
//! fresh service.

use crate::{
    chain::{build_customer_chains, TransactionChain},
    config::{ChainFilter, ServiceConfig},
    index::TransactionIndex,
    relationship::{build_relationships, Relationship, RelationshipMap},
    transaction::Transaction,
    types::CustomerId,
    validation::validators_for,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope for a customer's chains, as served to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerTransactions {
    pub transactions: Vec<TransactionChain>,
}

/// Envelope for a customer's relationships, as served to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRelationships {
    pub related_customers: Vec<Relationship>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSummary {
    pub indexed_records:    usize,
    pub customers:          usize,
    pub chains:             usize,
    pub rejected_chains:    usize,
    pub relationship_edges: usize,
}

#[derive(Debug, Clone)]
pub struct AggregationService {
    chains:          HashMap<CustomerId, Vec<TransactionChain>>,
    relationships:   RelationshipMap,
    indexed_records: usize,
    rejected_chains: usize,
}

impl AggregationService {
    /// Build with the default config: no chain filtering.
    pub fn new(records: &[Transaction]) -> Self {
        Self::with_config(records, &ServiceConfig::default())
    }

    pub fn with_config(records: &[Transaction], config: &ServiceConfig) -> Self {
        log::info!("Building customer views from {} transactions", records.len());
        if config.chain_filter != ChainFilter::None {
            log::info!("Chain filter active: {:?}", config.chain_filter);
        }

        let index = TransactionIndex::build(records);
        let relationships = build_relationships(records, &index);
        let validators = validators_for(config.chain_filter);
        let chains = build_customer_chains(records, &index, &validators);

        log::info!(
            "Customer transaction graph complete. {} customers found",
            chains.by_customer.len()
        );

        Self {
            chains:          chains.by_customer,
            relationships,
            indexed_records: index.len(),
            rejected_chains: chains.rejected,
        }
    }

    /// True iff at least one chain exists for `customer_id`.
    ///
    /// Relationship-only customers read as unknown here even though
    /// `customer_relationships` may return edges for them.
    pub fn has_customer(&self, customer_id: CustomerId) -> bool {
        self.chains.contains_key(&customer_id)
    }

    pub fn customer_transactions(&self, customer_id: CustomerId) -> &[TransactionChain] {
        self.chains.get(&customer_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn customer_relationships(&self, customer_id: CustomerId) -> &[Relationship] {
        self.relationships.get(&customer_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn transactions_envelope(&self, customer_id: CustomerId) -> CustomerTransactions {
        CustomerTransactions {
            transactions: self.customer_transactions(customer_id).to_vec(),
        }
    }

    pub fn relationships_envelope(&self, customer_id: CustomerId) -> CustomerRelationships {
        CustomerRelationships {
            related_customers: self.customer_relationships(customer_id).to_vec(),
        }
    }

    /// Known customers, ascending.
    pub fn customer_ids(&self) -> Vec<CustomerId> {
        let mut ids: Vec<CustomerId> = self.chains.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            indexed_records:    self.indexed_records,
            customers:          self.chains.len(),
            chains:             self.chains.values().map(Vec::len).sum(),
            rejected_chains:    self.rejected_chains,
            relationship_edges: self.relationships.values().map(Vec::len).sum(),
        }
    }
}
