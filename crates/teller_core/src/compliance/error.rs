//! Lookup failure taxonomy.
//!
//! Lookup failures are recovered inside the gate: they surface through
//! `GateState::check_error` and the observer callback, never as a panic
//! or an error return to the hosting screen.

use std::fmt;

/// A failed reservation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Network or HTTP-level failure from the injected client.
    Transport(String),
    /// Response body that could not be interpreted at all.
    MalformedResponse(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(msg) => {
                write!(f, "reservation lookup transport failure: {msg}")
            }
            LookupError::MalformedResponse(msg) => {
                write!(f, "reservation lookup returned malformed body: {msg}")
            }
        }
    }
}

impl std::error::Error for LookupError {}
