//! Transaction lifecycle state machine.
//!
//! TRANSITIONS (complete table):
//!   Uninitialized --StartPending--> Pending
//!   Uninitialized --StartSettled--> Settled
//!   Pending       --Settle-------> Settled
//!   Pending       --Decline------> Declined
//!   Pending       --Cancel-------> Canceled
//!   Settled       --Return-------> Returned
//!   Declined, Canceled, Returned: terminal
//!
//! An event with no edge leaves the state where it is.

use super::ChainValidator;
use crate::{
    index::TransactionIndex,
    transaction::{Transaction, TransactionStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Pending,
    Settled,
    Declined,
    Canceled,
    Returned,
}

impl From<TransactionStatus> for LifecycleState {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending  => Self::Pending,
            TransactionStatus::Settled  => Self::Settled,
            TransactionStatus::Declined => Self::Declined,
            TransactionStatus::Canceled => Self::Canceled,
            TransactionStatus::Returned => Self::Returned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    StartPending,
    StartSettled,
    Settle,
    Decline,
    Cancel,
    Return,
}

impl LifecycleEvent {
    /// The event implied by a member reporting `status`.
    /// Only the first member may start as SETTLED.
    pub fn for_status(status: TransactionStatus, is_first: bool) -> Self {
        match status {
            TransactionStatus::Settled if is_first => Self::StartSettled,
            TransactionStatus::Pending  => Self::StartPending,
            TransactionStatus::Settled  => Self::Settle,
            TransactionStatus::Returned => Self::Return,
            TransactionStatus::Declined => Self::Decline,
            TransactionStatus::Canceled => Self::Cancel,
        }
    }
}

impl LifecycleState {
    pub fn next(self, event: LifecycleEvent) -> Option<LifecycleState> {
        use LifecycleEvent as E;
        use LifecycleState as S;
        match (self, event) {
            (S::Uninitialized, E::StartPending) => Some(S::Pending),
            (S::Uninitialized, E::StartSettled) => Some(S::Settled),
            (S::Pending,       E::Settle)       => Some(S::Settled),
            (S::Pending,       E::Decline)      => Some(S::Declined),
            (S::Pending,       E::Cancel)       => Some(S::Canceled),
            (S::Settled,       E::Return)       => Some(S::Returned),
            _ => None,
        }
    }

    /// Apply `event`, staying put when the table has no edge for it.
    pub fn apply(self, event: LifecycleEvent) -> LifecycleState {
        self.next(event).unwrap_or(self)
    }
}

/// Statuses a chain may legally end on. SETTLED can still move to
/// RETURNED, so it is accepted here without being terminal in the table.
const ACCEPTED_FINAL_STATUSES: [TransactionStatus; 4] = [
    TransactionStatus::Settled,
    TransactionStatus::Returned,
    TransactionStatus::Declined,
    TransactionStatus::Canceled,
];

/// Walk a chronological status sequence through the state machine.
///
/// Every step is evaluated even after a failure. An empty sequence is valid.
pub fn validate_status_sequence<I>(statuses: I) -> bool
where
    I: IntoIterator<Item = TransactionStatus>,
{
    let mut state = LifecycleState::Uninitialized;
    let mut all_steps_valid = true;
    let mut last = None;

    for (i, status) in statuses.into_iter().enumerate() {
        state = state.apply(LifecycleEvent::for_status(status, i == 0));
        if state != LifecycleState::from(status) {
            log::trace!("status step {i}: declared {} but machine is at {state:?}", status.as_str());
            all_steps_valid = false;
        }
        last = Some(status);
    }

    match last {
        None => true,
        Some(final_status) => all_steps_valid && ACCEPTED_FINAL_STATUSES.contains(&final_status),
    }
}

/// Validates that a chain's statuses form a legal lifecycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTransitionValidator;

impl ChainValidator for StatusTransitionValidator {
    fn name(&self) -> &'static str {
        "status_transition"
    }

    fn validate(&self, members: &[&Transaction], _index: &TransactionIndex<'_>) -> bool {
        validate_status_sequence(members.iter().map(|tx| tx.transaction_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        let events = [
            LifecycleEvent::StartPending,
            LifecycleEvent::StartSettled,
            LifecycleEvent::Settle,
            LifecycleEvent::Decline,
            LifecycleEvent::Cancel,
            LifecycleEvent::Return,
        ];
        for state in [LifecycleState::Declined, LifecycleState::Canceled, LifecycleState::Returned] {
            for event in events {
                assert_eq!(state.next(event), None, "{state:?} accepted {event:?}");
            }
        }
    }

    #[test]
    fn settled_is_only_reachable_as_first_or_from_pending() {
        assert_eq!(
            LifecycleEvent::for_status(TransactionStatus::Settled, true),
            LifecycleEvent::StartSettled
        );
        assert_eq!(
            LifecycleEvent::for_status(TransactionStatus::Settled, false),
            LifecycleEvent::Settle
        );
        assert_eq!(LifecycleState::Settled.apply(LifecycleEvent::Settle), LifecycleState::Settled);
        assert_eq!(LifecycleState::Settled.next(LifecycleEvent::Settle), None);
    }

    #[test]
    fn pending_after_start_maps_to_a_dead_event() {
        let event = LifecycleEvent::for_status(TransactionStatus::Pending, false);
        assert_eq!(event, LifecycleEvent::StartPending);
        assert_eq!(LifecycleState::Returned.apply(event), LifecycleState::Returned);
    }
}
