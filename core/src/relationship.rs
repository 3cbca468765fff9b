//! Customer relationship graph.
//!
//! Two independent edge sources, merged per customer:
//!   1. P2P links: a P2P_SEND whose related record is a P2P_RECEIVE.
//!      Edges keep the order of the originating SEND in the input.
//!   2. Shared devices: every pair of distinct customers seen on the same
//!      device id. Appended after P2P edges, ascending by related customer.
//!
//! P2P edges dedup on (from, to, type). Device edges dedup on the
//! unordered customer pair, however many devices the pair shares.

use crate::{
    index::TransactionIndex,
    transaction::{Transaction, TransactionType},
    types::CustomerId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationType {
    #[serde(rename = "P2P_SEND")]
    P2pSend,
    #[serde(rename = "P2P_RECEIVE")]
    P2pReceive,
    #[serde(rename = "DEVICE")]
    Device,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P2pSend    => "P2P_SEND",
            Self::P2pReceive => "P2P_RECEIVE",
            Self::Device     => "DEVICE",
        }
    }
}

/// A directed edge owned by the source customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub related_customer_id: CustomerId,
    pub relation_type:       RelationType,
}

pub type RelationshipMap = HashMap<CustomerId, Vec<Relationship>>;

type EdgeKey = (CustomerId, CustomerId, RelationType);

/// Directed P2P edges `(from, to, type)` in originating SEND order, deduplicated.
pub fn p2p_edges(records: &[Transaction], index: &TransactionIndex<'_>) -> Vec<EdgeKey> {
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut edges = Vec::new();

    for tx in records.iter().filter(|tx| tx.transaction_type == TransactionType::P2pSend) {
        let Some(receiver_tx) = index.related(tx) else { continue };
        if receiver_tx.transaction_type != TransactionType::P2pReceive {
            continue;
        }

        let sender = tx.customer_id;
        let receiver = receiver_tx.customer_id;
        for edge in [
            (sender, receiver, RelationType::P2pSend),
            (receiver, sender, RelationType::P2pReceive),
        ] {
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}

/// Customers per non-empty device id.
pub fn customers_by_device(records: &[Transaction]) -> BTreeMap<&str, BTreeSet<CustomerId>> {
    let mut devices: BTreeMap<&str, BTreeSet<CustomerId>> = BTreeMap::new();
    for tx in records {
        if let Some(device) = tx.device_id() {
            devices.entry(device).or_default().insert(tx.customer_id);
        }
    }
    devices
}

/// Unordered customer pairs `(low, high)` sharing at least one device.
pub fn shared_device_pairs(records: &[Transaction]) -> BTreeSet<(CustomerId, CustomerId)> {
    let mut pairs = BTreeSet::new();
    for customers in customers_by_device(records).values() {
        if customers.len() < 2 {
            continue;
        }
        let members: Vec<CustomerId> = customers.iter().copied().collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                pairs.insert((a.min(b), a.max(b)));
            }
        }
    }
    pairs
}

/// Build the full per-customer adjacency list.
pub fn build_relationships(records: &[Transaction], index: &TransactionIndex<'_>) -> RelationshipMap {
    let mut graph: RelationshipMap = HashMap::new();

    let p2p = p2p_edges(records, index);
    for &(from, to, relation_type) in &p2p {
        graph.entry(from).or_default().push(Relationship {
            related_customer_id: to,
            relation_type,
        });
    }

    let pairs = shared_device_pairs(records);
    let mut device_neighbours: BTreeMap<CustomerId, BTreeSet<CustomerId>> = BTreeMap::new();
    for &(a, b) in &pairs {
        device_neighbours.entry(a).or_default().insert(b);
        device_neighbours.entry(b).or_default().insert(a);
    }
    for (customer, neighbours) in device_neighbours {
        let edges = graph.entry(customer).or_default();
        edges.extend(neighbours.into_iter().map(|related_customer_id| Relationship {
            related_customer_id,
            relation_type: RelationType::Device,
        }));
    }

    log::debug!(
        "relationships: {} p2p edges, {} shared-device pairs, {} customers with edges",
        p2p.len(),
        pairs.len(),
        graph.len()
    );
    graph
}
