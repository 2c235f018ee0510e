//! Tests for the exchange blocking rule.
//!
//! A reservation in `pending` or `rejected` blocks; everything else,
//! including no reservation at all, leaves the exchange enabled.

use teller_core::compliance::{
    FailurePolicy, LookupError, ReservationSnapshot, ReservationStatus, exchange_disabled,
    should_block_exchange,
};

fn snapshot(status: ReservationStatus) -> ReservationSnapshot {
    ReservationSnapshot::with_status(status)
}

// ─── Blocking rule ──────────────────────────────────────────────────────

#[test]
fn pending_reservation_blocks() {
    let snap = snapshot(ReservationStatus::Pending);
    assert!(should_block_exchange(Some(&snap)));
}

#[test]
fn rejected_reservation_blocks() {
    let snap = snapshot(ReservationStatus::Rejected);
    assert!(should_block_exchange(Some(&snap)));
}

#[test]
fn approved_reservation_does_not_block() {
    let snap = snapshot(ReservationStatus::Approved);
    assert!(!should_block_exchange(Some(&snap)));
}

#[test]
fn unknown_status_does_not_block() {
    let snap = snapshot(ReservationStatus::Other("under_review".to_string()));
    assert!(!should_block_exchange(Some(&snap)));
}

#[test]
fn no_reservation_does_not_block() {
    assert!(!should_block_exchange(None));
}

// ─── Failure policy ─────────────────────────────────────────────────────

#[test]
fn lookup_error_does_not_block_under_fail_open() {
    let error = LookupError::Transport("connection refused".to_string());
    assert!(!exchange_disabled(
        None,
        Some(&error),
        FailurePolicy::FailOpen
    ));
}

#[test]
fn lookup_error_blocks_under_fail_closed() {
    let error = LookupError::Transport("connection refused".to_string());
    assert!(exchange_disabled(
        None,
        Some(&error),
        FailurePolicy::FailClosed
    ));
}

#[test]
fn no_error_does_not_block_under_fail_closed() {
    assert!(!exchange_disabled(None, None, FailurePolicy::FailClosed));
}

#[test]
fn blocked_reservation_blocks_under_both_policies() {
    let snap = snapshot(ReservationStatus::Pending);
    assert!(exchange_disabled(Some(&snap), None, FailurePolicy::FailOpen));
    assert!(exchange_disabled(
        Some(&snap),
        None,
        FailurePolicy::FailClosed
    ));
}

// ─── Wire round-trip of statuses ────────────────────────────────────────

#[test]
fn known_statuses_parse_from_wire() {
    assert_eq!(
        ReservationStatus::from_wire("pending"),
        ReservationStatus::Pending
    );
    assert_eq!(
        ReservationStatus::from_wire("approved"),
        ReservationStatus::Approved
    );
    assert_eq!(
        ReservationStatus::from_wire("rejected"),
        ReservationStatus::Rejected
    );
}

#[test]
fn unknown_status_is_preserved_verbatim() {
    let status = ReservationStatus::from_wire("Escalated");
    assert_eq!(status, ReservationStatus::Other("Escalated".to_string()));
    assert_eq!(status.as_wire(), "Escalated");
}

#[test]
fn casing_is_not_second_guessed() {
    // "Pending" is not "pending"; only exact wire statuses block.
    let status = ReservationStatus::from_wire("Pending");
    assert!(matches!(status, ReservationStatus::Other(_)));
    assert!(!should_block_exchange(Some(&snapshot(status))));
}
