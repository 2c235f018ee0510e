//! Reservation records as seen by the gate.
//!
//! The compliance backend owns the full reservation record; the gate only
//! needs the status plus enough identity to journal the decision.

/// Reservation status reported by the compliance backend.
///
/// Statuses outside the known set are preserved verbatim in `Other`.
/// Unknown statuses never block: the gate enforces the statuses it knows,
/// nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Reservation filed, awaiting compliance approval.
    Pending,
    /// Reservation approved; the exchange may proceed.
    Approved,
    /// Reservation rejected by compliance.
    Rejected,
    /// Any status string outside the known set.
    Other(String),
}

impl ReservationStatus {
    /// Map the backend's status string onto the known set.
    ///
    /// Matching is exact; the backend emits lowercase statuses and the
    /// gate does not second-guess casing.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "pending" => ReservationStatus::Pending,
            "approved" => ReservationStatus::Approved,
            "rejected" => ReservationStatus::Rejected,
            other => ReservationStatus::Other(other.to_string()),
        }
    }

    /// The wire representation of this status.
    pub fn as_wire(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Other(status) => status,
        }
    }
}

/// Gate-relevant projection of a backend reservation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationSnapshot {
    /// Backend reservation identifier, if the response carried one.
    pub reservation_id: Option<String>,
    /// Parsed status.
    pub status: ReservationStatus,
}

impl ReservationSnapshot {
    /// Snapshot with just a status, for callers without a reservation id.
    pub fn with_status(status: ReservationStatus) -> Self {
        Self {
            reservation_id: None,
            status,
        }
    }
}
