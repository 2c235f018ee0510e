//! Lookup sequence numbers.
//!
//! An in-flight HTTP request cannot be cancelled, so completions can
//! arrive out of order relative to the latest identifier input. Each
//! lookup is issued a monotonically increasing ticket; only the most
//! recently issued ticket is accepted, every other completion is
//! discarded as stale. Displayed state therefore always reflects the
//! last identifier entered.

/// Ticket identifying a single issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket(u64);

impl LookupTicket {
    /// The raw sequence number (journaled alongside the decision).
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides which completion is current.
#[derive(Debug, Clone, Default)]
pub struct LookupSequencer {
    next_seq: u64,
    latest: Option<u64>,
}

impl LookupSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket. The previously issued ticket, if still
    /// outstanding, becomes stale.
    pub fn issue(&mut self) -> LookupTicket {
        self.next_seq += 1;
        self.latest = Some(self.next_seq);
        LookupTicket(self.next_seq)
    }

    /// Accept a completion.
    ///
    /// Returns `true` only for the most recently issued ticket, and only
    /// once; a duplicate completion of the same ticket is stale.
    pub fn accept(&mut self, ticket: LookupTicket) -> bool {
        if self.latest == Some(ticket.0) {
            self.latest = None;
            true
        } else {
            false
        }
    }

    /// Invalidate the outstanding ticket, if any.
    ///
    /// Used when the identifier is cleared or the gate is disposed: an
    /// in-flight completion must not mutate reset state.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    /// Whether a ticket is outstanding.
    pub fn has_outstanding(&self) -> bool {
        self.latest.is_some()
    }
}
