//! Gate lifecycle state machine.
//!
//! **States:** `Idle -> Checking -> {Blocked | Allowed}`, returning to
//! `Idle` whenever the identifier is cleared. `Checking` is re-entered on
//! every issued lookup. `Disposed` is the only terminal state.
//!
//! **Hard rules:**
//! - Never panic on an out-of-place event; ignore it with a reason.
//! - No transition leaves `Disposed`.

// ─── Phases ─────────────────────────────────────────────────────────────

/// Gate lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatePhase {
    /// No identifier, nothing to check.
    Idle,
    /// A lookup is outstanding for the current identifier.
    Checking,
    /// The latest accepted lookup decided the exchange is blocked.
    Blocked,
    /// The latest accepted lookup decided the exchange may proceed.
    Allowed,
    /// The hosting screen has been torn down.
    Disposed,
}

impl GatePhase {
    /// Whether this phase is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, GatePhase::Disposed)
    }
}

// ─── Events ─────────────────────────────────────────────────────────────

/// Events that drive gate transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// The identifier became empty; the gate resets.
    IdentifierCleared,
    /// A debounced (or immediate) lookup was issued.
    LookupIssued,
    /// The accepted lookup decided "blocked".
    DecidedBlocked,
    /// The accepted lookup decided "allowed".
    DecidedAllowed,
    /// The hosting screen is tearing down.
    Disposed,
}

// ─── Transition result ──────────────────────────────────────────────────

/// Result of applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateTransition {
    /// Normal transition.
    Transitioned { from: GatePhase, to: GatePhase },
    /// Event ignored, with the reason.
    Ignored {
        current: GatePhase,
        event: GateEvent,
        reason: &'static str,
    },
}

// ─── Machine instance ───────────────────────────────────────────────────

/// A single gate's lifecycle machine.
///
/// **Never panics.** Out-of-place events are ignored, not rejected.
#[derive(Debug, Clone)]
pub struct GateMachine {
    phase: GatePhase,
    /// History of transitions, for diagnostics.
    transitions: Vec<(GateEvent, GatePhase, GatePhase)>,
}

impl GateMachine {
    /// Create a machine in the `Idle` phase.
    pub fn new() -> Self {
        Self {
            phase: GatePhase::Idle,
            transitions: Vec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Number of transitions recorded.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Apply an event to the machine.
    pub fn apply(&mut self, event: GateEvent) -> GateTransition {
        let from = self.phase;

        if from.is_terminal() {
            return GateTransition::Ignored {
                current: from,
                event,
                reason: "gate already disposed",
            };
        }

        match (&from, &event) {
            (_, GateEvent::Disposed) => self.transition(from, GatePhase::Disposed, event),

            (_, GateEvent::IdentifierCleared) => self.transition(from, GatePhase::Idle, event),

            // Checking is re-entered when a new lookup supersedes an
            // outstanding one.
            (_, GateEvent::LookupIssued) => self.transition(from, GatePhase::Checking, event),

            (GatePhase::Checking, GateEvent::DecidedBlocked) => {
                self.transition(from, GatePhase::Blocked, event)
            }

            (GatePhase::Checking, GateEvent::DecidedAllowed) => {
                self.transition(from, GatePhase::Allowed, event)
            }

            _ => GateTransition::Ignored {
                current: from,
                event,
                reason: "no lookup in flight",
            },
        }
    }

    fn transition(&mut self, from: GatePhase, to: GatePhase, event: GateEvent) -> GateTransition {
        self.phase = to;
        self.transitions.push((event, from, to));
        GateTransition::Transitioned { from, to }
    }
}

impl Default for GateMachine {
    fn default() -> Self {
        Self::new()
    }
}
