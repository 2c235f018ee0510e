//! HTTP capability seam and the AMLO reservation client.
//!
//! The gate consumes an injected transport, never a concrete HTTP
//! stack: hosts provide whatever client they already run, tests provide
//! a fake. `AmloReservationClient` adapts any `HttpGet` into the core's
//! `ReservationLookup` capability.

use std::fmt;

use teller_core::compliance::{LookupError, ReservationSnapshot};
use teller_core::gate::ReservationLookup;
use teller_core::identity::CustomerId;

use crate::amlo::parse_reservation_check;

/// Path of the check-customer-reservation endpoint, relative to the
/// configured API base.
pub const CHECK_CUSTOMER_RESERVATION_PATH: &str = "/amlo/check-customer-reservation";

// ─── Transport seam ─────────────────────────────────────────────────────

/// Transport-level failure from an injected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code, when the request got far enough to have one.
    pub status: Option<u16>,
    /// Transport diagnostic.
    pub message: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "http status {status}: {}", self.message),
            None => write!(f, "http transport error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

/// Minimal injected GET capability.
///
/// Implementations issue a GET for `path` with the given query
/// parameters and return the raw response body.
pub trait HttpGet {
    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, HttpError>;
}

// ─── Reservation client ─────────────────────────────────────────────────

/// Reservation-check client over an injected `HttpGet`.
#[derive(Debug, Clone)]
pub struct AmloReservationClient<T: HttpGet> {
    http: T,
}

impl<T: HttpGet> AmloReservationClient<T> {
    pub fn new(http: T) -> Self {
        Self { http }
    }

    /// The underlying transport.
    pub fn http(&self) -> &T {
        &self.http
    }
}

impl<T: HttpGet> ReservationLookup for AmloReservationClient<T> {
    fn check_customer_reservation(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<ReservationSnapshot>, LookupError> {
        let body = self
            .http
            .get(
                CHECK_CUSTOMER_RESERVATION_PATH,
                &[("customer_id", customer_id.as_str())],
            )
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let response = parse_reservation_check(&body)?;
        Ok(response.into_snapshot())
    }
}
