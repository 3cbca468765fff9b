//! Record builders shared by the integration tests.

#![allow(dead_code)]

use ledger_graph_core::transaction::{
    Transaction, TransactionMetadata, TransactionStatus, TransactionType,
};

pub const T0: &str = "2024-03-01T12:00:00Z";
pub const T1: &str = "2024-03-01T12:01:00Z";
pub const T2: &str = "2024-03-02T15:00:00Z";
pub const T3: &str = "2024-03-02T15:10:00Z";

pub struct TxBuilder(Transaction);

/// A settled POS record for `customer` with auth code "AUTH" at T0.
pub fn tx(id: i64, customer: i64) -> TxBuilder {
    TxBuilder(Transaction {
        transaction_id:     id,
        authorization_code: "AUTH".into(),
        transaction_date:   T0.into(),
        customer_id:        customer,
        transaction_type:   TransactionType::Pos,
        transaction_status: TransactionStatus::Settled,
        description:        format!("Test transaction {id}"),
        amount:             100.0,
        metadata:           TransactionMetadata::default(),
    })
}

impl TxBuilder {
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.0.transaction_type = kind;
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.0.transaction_status = status;
        self
    }

    pub fn auth(mut self, code: &str) -> Self {
        self.0.authorization_code = code.into();
        self
    }

    pub fn at(mut self, date: &str) -> Self {
        self.0.transaction_date = date.into();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.0.amount = amount;
        self
    }

    pub fn related(mut self, id: i64) -> Self {
        self.0.metadata.related_transaction_id = Some(id);
        self
    }

    pub fn device(mut self, device: &str) -> Self {
        self.0.metadata.device_id = Some(device.into());
        self
    }

    pub fn build(self) -> Transaction {
        self.0
    }
}

/// Four-record scenario: a P2P pair between 101 and 102, a POS for 101
/// and a fee booked on 102 that points at 101's POS.
pub fn p2p_scenario() -> Vec<Transaction> {
    use TransactionType::*;
    vec![
        tx(1, 101).kind(P2pSend).auth("A").related(3).amount(100.0).at(T0).build(),
        tx(2, 101).kind(Pos).auth("B").amount(100.0).at(T0).build(),
        tx(3, 102).kind(P2pReceive).auth("A").related(1).at(T1).build(),
        tx(4, 102).kind(Fee).related(2).at(T1).build(),
    ]
}

/// The scenario plus device ids and two unrelated wire customers sharing a device.
pub fn device_scenario() -> Vec<Transaction> {
    use TransactionStatus::*;
    use TransactionType::*;
    vec![
        tx(1, 101).kind(P2pSend).auth("AUTH123").related(3).device("DEVICE_A").build(),
        tx(2, 101).kind(Pos).auth("AUTH456").device("DEVICE_C").build(),
        tx(3, 102).kind(P2pReceive).auth("AUTH123").related(1).device("DEVICE_A").at(T1).build(),
        tx(4, 102).kind(Fee).auth("AUTH123").related(2).at(T1).build(),
        tx(5, 103).kind(WireOutgoing).status(Pending).auth("AUTH456").amount(50.0).device("DEVICE_B").at(T2).build(),
        tx(6, 104).kind(WireOutgoing).status(Pending).auth("AUTH789").amount(30.0).device("DEVICE_B").at(T3).build(),
    ]
}
