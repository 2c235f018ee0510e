pub mod customer_id;
pub mod digest;

pub use customer_id::CustomerId;
pub use digest::{customer_digest, format_digest};
