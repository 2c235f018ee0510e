//! Quiet-period debounce for identifier changes.
//!
//! A classic debounce: at most one deadline is pending at a time, and
//! every new change cancels and replaces it, so only the last value
//! within any quiet window triggers a lookup.
//!
//! Time is injected via `_at` suffixed methods for deterministic testing.
//! Production callers use the convenience methods without the suffix.

use std::time::{Duration, Instant};

/// Single-deadline debounce timer.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Create a timer with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record a change, cancelling any pending deadline and re-arming at
    /// `now + quiet_period`.
    ///
    /// Production entry point. Uses `Instant::now()`.
    pub fn note_change(&mut self) {
        self.note_change_at(Instant::now());
    }

    /// Record a change with an explicit timestamp.
    pub fn note_change_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    /// Arm the timer to fire on the next poll, skipping the quiet period.
    ///
    /// Used for the mount path: an identifier already present when the
    /// screen mounts is checked immediately rather than debounced.
    pub fn arm_immediate_at(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// Cancel the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the pending deadline has been reached.
    pub fn due_at(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if deadline <= now)
    }

    /// Consume a due deadline.
    ///
    /// Production entry point. Uses `Instant::now()`.
    pub fn fire_if_due(&mut self) -> bool {
        self.fire_if_due_at(Instant::now())
    }

    /// Consume a due deadline with an explicit timestamp.
    ///
    /// Returns `true` exactly once per armed deadline that has been
    /// reached.
    pub fn fire_if_due_at(&mut self, now: Instant) -> bool {
        if self.due_at(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
