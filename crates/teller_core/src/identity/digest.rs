//! Log-safe customer identifier digests.
//!
//! Raw customer identifiers MUST NOT appear in logs, metrics labels, or
//! journal records. Every diagnostic surface names the customer by the
//! xxh64 digest of the trimmed identifier instead.

use xxhash_rust::xxh64::xxh64;

use super::CustomerId;

/// Compute the xxh64 digest of a customer identifier.
pub fn customer_digest(id: &CustomerId) -> u64 {
    xxh64(id.as_str().as_bytes(), 0)
}

/// Format a digest as a fixed-width hex string.
pub fn format_digest(digest: u64) -> String {
    format!("{digest:016x}")
}
