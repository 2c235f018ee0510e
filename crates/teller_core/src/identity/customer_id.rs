//! Customer identifier input handling.
//!
//! Identifiers arrive from a bound form field and may carry surrounding
//! whitespace or be entirely empty. `CustomerId::parse` is the only
//! constructor: the gate never sees an untrimmed or empty identifier,
//! and an empty input is the "identifier cleared" signal rather than a
//! value.
//!
//! There is intentionally no `Display` impl. Raw identifiers are PII;
//! anything that needs to name a customer in a log or journal goes
//! through [`super::digest`].

/// A trimmed, non-empty customer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parse a raw input value.
    ///
    /// Trims surrounding whitespace. Returns `None` for empty or
    /// whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed identifier value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
