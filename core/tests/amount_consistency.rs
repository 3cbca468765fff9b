//! Amount and fee-reference consistency checks.

mod common;

use common::tx;
use ledger_graph_core::{
    index::TransactionIndex,
    transaction::{Transaction, TransactionType::*},
    validation::{
        amount::{adjacent_amounts_agree, fees_reference_known_parents},
        AmountConsistencyValidator, ChainValidator,
    },
};

fn check(chain: &[Transaction], universe: &[Transaction]) -> bool {
    let index = TransactionIndex::build(universe);
    let members: Vec<&Transaction> = chain.iter().collect();
    AmountConsistencyValidator.validate(&members, &index)
}

#[test]
fn adjacent_pos_records_with_different_amounts_fail() {
    let chain = vec![
        tx(1, 1).kind(Pos).amount(100.0).build(),
        tx(2, 1).kind(Pos).amount(99.0).build(),
    ];
    assert!(!check(&chain, &chain));
}

#[test]
fn fee_without_related_id_fails() {
    let chain = vec![
        tx(1, 1).kind(Pos).amount(100.0).build(),
        tx(2, 1).kind(Fee).amount(2.5).build(),
    ];
    assert!(!check(&chain, &chain));
}

#[test]
fn fee_pointing_outside_the_index_fails() {
    let chain = vec![tx(2, 1).kind(Fee).related(77).build()];
    assert!(!check(&chain, &chain));
}

#[test]
fn fee_parent_may_live_outside_the_chain() {
    let parent = tx(77, 9).kind(WireOutgoing).build();
    let chain = vec![tx(2, 1).kind(Fee).related(77).build()];
    let universe = vec![parent, chain[0].clone()];
    assert!(check(&chain, &universe));
}

#[test]
fn fees_are_ignored_for_amount_comparison() {
    let chain = vec![
        tx(1, 1).kind(WireOutgoing).amount(500.0).build(),
        tx(2, 1).kind(Fee).related(1).amount(15.0).build(),
        tx(3, 1).kind(WireOutgoing).amount(500.0).build(),
    ];
    assert!(check(&chain, &chain));
}

#[test]
fn only_neighbours_are_compared() {
    // POS 100 and POS 50 are never adjacent once the wire sits between them.
    let chain = vec![
        tx(1, 1).kind(Pos).amount(100.0).build(),
        tx(2, 1).kind(WireIncoming).amount(7.0).build(),
        tx(3, 1).kind(Pos).amount(50.0).build(),
    ];
    let members: Vec<&Transaction> = chain.iter().collect();
    assert!(adjacent_amounts_agree(&members));
}

#[test]
fn consistent_chain_passes_both_checks() {
    let chain = vec![
        tx(1, 1).kind(AchIncoming).amount(20.0).build(),
        tx(2, 1).kind(AchIncoming).amount(20.0).build(),
        tx(3, 1).kind(Fee).related(2).amount(1.0).build(),
    ];
    let index = TransactionIndex::build(&chain);
    let members: Vec<&Transaction> = chain.iter().collect();
    assert!(fees_reference_known_parents(&members, &index));
    assert!(adjacent_amounts_agree(&members));
    assert!(check(&chain, &chain));
}
