//! Check-customer-reservation response model.
//!
//! Models the JSON body of `GET /amlo/check-customer-reservation`. The
//! backend owns the full reservation record; only the fields the gate
//! and the decision journal need are modeled, everything else in the
//! body is ignored.

use serde::Deserialize;

use teller_core::compliance::{LookupError, ReservationSnapshot, ReservationStatus};

/// Response body of the check-customer-reservation endpoint.
///
/// `has_reservation` defaults to `false` when the field is missing: a
/// response the gate cannot read gates as "no reservation".
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCheckResponse {
    /// Whether a reservation exists for the queried customer.
    #[serde(default)]
    pub has_reservation: bool,

    /// Backend reservation identifier.
    #[serde(default)]
    pub reservation_id: Option<String>,

    /// Reservation status string ("pending", "approved", "rejected", ...).
    #[serde(default)]
    pub status: Option<String>,

    /// Customer display name as recorded on the reservation.
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Epoch milliseconds when the reservation was filed.
    #[serde(default)]
    pub reserved_at_ms: Option<u64>,
}

impl ReservationCheckResponse {
    /// Project the response onto the gate's snapshot type.
    ///
    /// `has_reservation == false` projects to `None` regardless of any
    /// other fields present. A reservation without a status string
    /// projects to `Other("")`, which does not block.
    pub fn into_snapshot(self) -> Option<ReservationSnapshot> {
        if !self.has_reservation {
            return None;
        }
        let status = self
            .status
            .as_deref()
            .map(ReservationStatus::from_wire)
            .unwrap_or_else(|| ReservationStatus::Other(String::new()));
        Some(ReservationSnapshot {
            reservation_id: self.reservation_id,
            status,
        })
    }
}

/// Parse a response body.
///
/// A body that is not JSON at all (or types a field wrongly) is a
/// malformed response; the gate recovers it like any lookup failure. A
/// JSON body missing fields deserializes through the defaults above.
pub fn parse_reservation_check(body: &str) -> Result<ReservationCheckResponse, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse(e.to_string()))
}
