//! Exchange blocking rule.
//!
//! **Rule:** a reservation in `pending` or `rejected` blocks exchange
//! entry for that customer. No reservation, an approved reservation, or
//! an unknown status leaves the exchange enabled.
//!
//! `exchange_disabled` is the single place the gate flag is computed.
//! Callers never set the flag directly.

use super::error::LookupError;
use super::reservation::{ReservationSnapshot, ReservationStatus};

/// What the gate does when a reservation lookup fails.
///
/// `FailOpen` leaves the exchange enabled on lookup failure. `FailClosed`
/// blocks until a lookup succeeds. A backend outage under `FailOpen`
/// silently permits exchanges that a working backend would have gated;
/// branches choose the policy per their risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    FailOpen,
    FailClosed,
}

/// Blocking rule over the reservation alone.
///
/// `None` (no reservation on file) never blocks.
pub fn should_block_exchange(reservation: Option<&ReservationSnapshot>) -> bool {
    match reservation {
        None => false,
        Some(snapshot) => matches!(
            snapshot.status,
            ReservationStatus::Pending | ReservationStatus::Rejected
        ),
    }
}

/// Compute the `disable_exchange` flag from the full gate inputs.
///
/// Under `FailOpen` the flag is a pure function of the reservation alone.
/// Under `FailClosed` a recorded lookup error also blocks.
pub fn exchange_disabled(
    reservation: Option<&ReservationSnapshot>,
    check_error: Option<&LookupError>,
    policy: FailurePolicy,
) -> bool {
    if should_block_exchange(reservation) {
        return true;
    }
    policy == FailurePolicy::FailClosed && check_error.is_some()
}
