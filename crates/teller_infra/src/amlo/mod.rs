//! AMLO compliance backend wire types.
//!
//! Re-exports from sub-modules for convenient access.

pub mod reservation;

pub use reservation::{ReservationCheckResponse, parse_reservation_check};
