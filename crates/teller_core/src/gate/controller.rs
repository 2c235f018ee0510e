//! Reservation gate controller.
//!
//! Owns the gate state and wires the debounce timer, the lookup
//! sequencer and the lifecycle machine together. The controller is
//! single-threaded and deterministic: the hosting screen pumps it with
//! identifier changes and periodic polls, and collaborators (the HTTP
//! capability, the observer) are passed per call rather than stored.
//!
//! Lookup lifecycle is split-phase. `begin_lookup_at` consumes a due
//! deadline and hands back a [`LookupStart`]; the host executes the
//! request however it likes and reports the outcome through
//! `complete_lookup`. [`drive_at`] wraps both for synchronous hosts.
//!
//! **Hard rules:**
//! - Clearing the identifier resets state synchronously with zero
//!   network calls.
//! - `disable_exchange` is computed only by `compliance::exchange_disabled`.
//! - Stale completions and completions after `dispose` never mutate
//!   state.

use std::time::{Duration, Instant};

use crate::compliance::{FailurePolicy, LookupError, ReservationSnapshot, exchange_disabled};
use crate::identity::{CustomerId, customer_digest, format_digest};

use super::debounce::DebounceTimer;
use super::machine::{GateEvent, GateMachine, GatePhase};
use super::sequence::{LookupSequencer, LookupTicket};

/// Default quiet period between the last identifier change and the
/// lookup.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 400;

// ─── Configuration ──────────────────────────────────────────────────────

/// Gate configuration.
#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    /// Quiet period for the identifier debounce.
    pub quiet_period: Duration,
    /// What the gate does when a lookup fails.
    pub failure_policy: FailurePolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
            failure_policy: FailurePolicy::FailOpen,
        }
    }
}

// ─── Capability and observer seams ──────────────────────────────────────

/// Injected reservation-check capability.
///
/// `Ok(None)` means the backend reported no reservation for the
/// customer. Implementations live outside this crate; the gate itself
/// performs no I/O.
pub trait ReservationLookup {
    fn check_customer_reservation(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<ReservationSnapshot>, LookupError>;
}

/// Host callbacks. Both are optional; the defaults do nothing.
pub trait GateObserver {
    /// The accepted lookup updated the reservation status.
    fn reservation_status_updated(
        &mut self,
        _reservation: Option<&ReservationSnapshot>,
        _error: Option<&LookupError>,
    ) {
    }

    /// The identifier was cleared and the gate reset.
    fn reservation_status_cleared(&mut self) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GateObserver for NoopObserver {}

// ─── State ──────────────────────────────────────────────────────────────

/// Reactive gate state as exposed to the hosting screen.
///
/// The default value is also the reset value: no reservation, exchange
/// enabled, no error, no lookup outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateState {
    /// Latest accepted reservation, if the customer has one.
    pub reservation: Option<ReservationSnapshot>,
    /// Whether exchange entry is blocked. Computed by
    /// `compliance::exchange_disabled`, never set directly.
    pub disable_exchange: bool,
    /// Error from the latest accepted lookup, if it failed.
    pub check_error: Option<LookupError>,
    /// Whether a lookup is outstanding.
    pub check_in_progress: bool,
}

/// An issued lookup the host must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStart {
    /// Ticket to hand back to `complete_lookup`.
    pub ticket: LookupTicket,
    /// Identifier to query the backend with.
    pub customer_id: CustomerId,
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability counters for the gate.
#[derive(Debug, Default)]
pub struct GateMetrics {
    /// Lookups issued (`reservation_lookups_total`).
    lookups_total: u64,
    /// Accepted decisions that left the exchange enabled.
    allowed_total: u64,
    /// Accepted decisions that blocked the exchange.
    blocked_total: u64,
    /// Accepted lookups that failed (`reservation_lookup_failures_total`).
    lookup_failures_total: u64,
    /// Completions discarded as stale.
    stale_responses_total: u64,
    /// Identifier-cleared resets.
    cleared_total: u64,
    /// Due lookups skipped because no HTTP capability was injected.
    skipped_no_client_total: u64,
    /// Events ignored after dispose.
    ignored_after_dispose_total: u64,
}

impl GateMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups issued.
    pub fn lookups_total(&self) -> u64 {
        self.lookups_total
    }

    /// Accepted decisions that left the exchange enabled.
    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }

    /// Accepted decisions that blocked the exchange.
    pub fn blocked_total(&self) -> u64 {
        self.blocked_total
    }

    /// Accepted lookups that failed.
    pub fn lookup_failures_total(&self) -> u64 {
        self.lookup_failures_total
    }

    /// Completions discarded as stale.
    pub fn stale_responses_total(&self) -> u64 {
        self.stale_responses_total
    }

    /// Identifier-cleared resets.
    pub fn cleared_total(&self) -> u64 {
        self.cleared_total
    }

    /// Due lookups skipped for want of an HTTP capability.
    pub fn skipped_no_client_total(&self) -> u64 {
        self.skipped_no_client_total
    }

    /// Events ignored after dispose.
    pub fn ignored_after_dispose_total(&self) -> u64 {
        self.ignored_after_dispose_total
    }
}

// ─── Controller ─────────────────────────────────────────────────────────

/// The reservation gate.
///
/// One instance per hosting transaction screen. Created on mount,
/// disposed on unmount; all methods are cheap and synchronous.
#[derive(Debug)]
pub struct ReservationGate {
    config: GateConfig,
    state: GateState,
    machine: GateMachine,
    debounce: DebounceTimer,
    sequencer: LookupSequencer,
    /// Identifier awaiting (or last handed to) a lookup.
    pending_id: Option<CustomerId>,
    metrics: GateMetrics,
}

impl ReservationGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            debounce: DebounceTimer::new(config.quiet_period),
            config,
            state: GateState::default(),
            machine: GateMachine::new(),
            sequencer: LookupSequencer::new(),
            pending_id: None,
            metrics: GateMetrics::new(),
        }
    }

    /// Current gate state.
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GatePhase {
        self.machine.phase()
    }

    /// Gate counters.
    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    /// Gate configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether exchange entry is currently blocked.
    pub fn exchange_disabled(&self) -> bool {
        self.state.disable_exchange
    }

    /// Mount hook.
    ///
    /// An identifier already present when the screen mounts is armed for
    /// an immediate lookup, skipping the quiet period. An empty
    /// identifier leaves the gate idle.
    pub fn mount_at(&mut self, raw_id: &str, now: Instant) {
        if self.machine.phase().is_terminal() {
            self.metrics.ignored_after_dispose_total += 1;
            return;
        }
        if let Some(id) = CustomerId::parse(raw_id) {
            self.pending_id = Some(id);
            self.debounce.arm_immediate_at(now);
        }
    }

    /// Identifier change hook.
    ///
    /// Cancels any pending scheduled lookup first. An empty (or
    /// whitespace-only) value resets the gate synchronously and performs
    /// no network call; a non-empty value re-arms the debounce.
    pub fn on_identifier_change_at(
        &mut self,
        raw_id: &str,
        now: Instant,
        observer: &mut dyn GateObserver,
    ) {
        if self.machine.phase().is_terminal() {
            self.metrics.ignored_after_dispose_total += 1;
            return;
        }
        self.debounce.cancel();
        match CustomerId::parse(raw_id) {
            None => self.clear(observer),
            Some(id) => {
                self.pending_id = Some(id);
                self.debounce.note_change_at(now);
            }
        }
    }

    fn clear(&mut self, observer: &mut dyn GateObserver) {
        self.pending_id = None;
        self.sequencer.invalidate();
        self.state = GateState::default();
        self.machine.apply(GateEvent::IdentifierCleared);
        self.metrics.cleared_total += 1;
        observer.reservation_status_cleared();
    }

    /// Whether a scheduled lookup is due.
    pub fn lookup_due_at(&self, now: Instant) -> bool {
        self.debounce.due_at(now)
    }

    /// Consume a due deadline and issue a lookup.
    ///
    /// Marks `check_in_progress`, clears the prior error, enters
    /// `Checking`, and returns the request for the host to execute.
    /// Returns `None` when nothing is due.
    pub fn begin_lookup_at(&mut self, now: Instant) -> Option<LookupStart> {
        if self.machine.phase().is_terminal() {
            return None;
        }
        if !self.debounce.fire_if_due_at(now) {
            return None;
        }
        let customer_id = self.pending_id.clone()?;
        self.state.check_in_progress = true;
        self.state.check_error = None;
        self.machine.apply(GateEvent::LookupIssued);
        let ticket = self.sequencer.issue();
        self.metrics.lookups_total += 1;
        Some(LookupStart {
            ticket,
            customer_id,
        })
    }

    /// Missing HTTP capability: consume the due deadline without issuing
    /// a request. A silent skip, not an error.
    pub fn skip_lookup_missing_client_at(&mut self, now: Instant) {
        if self.debounce.fire_if_due_at(now) {
            self.metrics.skipped_no_client_total += 1;
        }
    }

    /// Report the outcome of an issued lookup.
    ///
    /// Stale tickets and completions arriving after dispose are
    /// discarded without touching state. For the accepted ticket,
    /// `check_in_progress` clears regardless of outcome; a failure reads
    /// as "no reservation" for gating purposes and is surfaced through
    /// `check_error` and the observer.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<Option<ReservationSnapshot>, LookupError>,
        observer: &mut dyn GateObserver,
    ) {
        if self.machine.phase().is_terminal() {
            self.metrics.ignored_after_dispose_total += 1;
            return;
        }
        if !self.sequencer.accept(ticket) {
            self.metrics.stale_responses_total += 1;
            tracing::debug!("ReservationLookupStale seq={} discarded", ticket.seq());
            return;
        }
        self.state.check_in_progress = false;
        match outcome {
            Ok(reservation) => self.handle_status_change(reservation, None, observer),
            Err(error) => {
                self.metrics.lookup_failures_total += 1;
                if let Some(id) = self.pending_id.as_ref() {
                    tracing::warn!(
                        "ReservationLookupFailed customer={} seq={} error={}",
                        format_digest(customer_digest(id)),
                        ticket.seq(),
                        error
                    );
                }
                self.handle_status_change(None, Some(error), observer);
            }
        }
    }

    /// State update path. The only writer of `disable_exchange`.
    fn handle_status_change(
        &mut self,
        reservation: Option<ReservationSnapshot>,
        error: Option<LookupError>,
        observer: &mut dyn GateObserver,
    ) {
        self.state.reservation = reservation;
        self.state.check_error = error;
        self.state.disable_exchange = exchange_disabled(
            self.state.reservation.as_ref(),
            self.state.check_error.as_ref(),
            self.config.failure_policy,
        );
        if self.state.disable_exchange {
            self.metrics.blocked_total += 1;
            self.machine.apply(GateEvent::DecidedBlocked);
        } else {
            self.metrics.allowed_total += 1;
            self.machine.apply(GateEvent::DecidedAllowed);
        }
        observer.reservation_status_updated(
            self.state.reservation.as_ref(),
            self.state.check_error.as_ref(),
        );
    }

    /// Teardown hook.
    ///
    /// Cancels the pending deadline and invalidates the outstanding
    /// ticket. No state mutation happens after this; late completions
    /// are counted and dropped.
    pub fn dispose(&mut self) {
        self.debounce.cancel();
        self.sequencer.invalidate();
        self.pending_id = None;
        self.machine.apply(GateEvent::Disposed);
    }
}

// ─── Synchronous driver ─────────────────────────────────────────────────

/// Fire a due lookup end-to-end against a synchronous client.
///
/// The capability is optional: a host without an HTTP client gets the
/// silent-skip behavior instead of an error.
pub fn drive_at(
    gate: &mut ReservationGate,
    now: Instant,
    client: Option<&dyn ReservationLookup>,
    observer: &mut dyn GateObserver,
) {
    if !gate.lookup_due_at(now) {
        return;
    }
    let Some(client) = client else {
        gate.skip_lookup_missing_client_at(now);
        return;
    };
    if let Some(start) = gate.begin_lookup_at(now) {
        let outcome = client.check_customer_reservation(&start.customer_id);
        gate.complete_lookup(start.ticket, outcome, observer);
    }
}
