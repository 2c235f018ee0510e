pub mod error;
pub mod policy;
pub mod reservation;

pub use error::LookupError;
pub use policy::{FailurePolicy, exchange_disabled, should_block_exchange};
pub use reservation::{ReservationSnapshot, ReservationStatus};
