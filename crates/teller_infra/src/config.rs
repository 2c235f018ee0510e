//! Gate configuration defaults.
//!
//! Every parameter has a default; an explicitly supplied value takes
//! precedence. Non-finite or negative explicit values are rejected
//! rather than silently misconfiguring the gate.

use std::fmt;
use std::time::Duration;

use teller_core::compliance::FailurePolicy;
use teller_core::gate::{DEFAULT_QUIET_PERIOD_MS, GateConfig};

/// Gate configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    /// Quiet period between the last identifier change and the lookup.
    ReservationDebounceMs,
    /// Timeout handed to `HttpGet` implementations.
    LookupTimeoutMs,
    /// Bound on the decision journal queue.
    JournalQueueCapacity,
}

/// Error when a supplied parameter value cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for InvalidConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config rejected: '{}' {}", self.param_name, self.reason)
    }
}

impl std::error::Error for InvalidConfigError {}

/// Returns the default for a parameter.
pub fn default_for(param: ConfigParam) -> f64 {
    match param {
        ConfigParam::ReservationDebounceMs => DEFAULT_QUIET_PERIOD_MS as f64,
        ConfigParam::LookupTimeoutMs => 5000.0,
        ConfigParam::JournalQueueCapacity => 1024.0,
    }
}

/// Returns the snake_case name for a parameter.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::ReservationDebounceMs => "reservation_debounce_ms",
        ConfigParam::LookupTimeoutMs => "lookup_timeout_ms",
        ConfigParam::JournalQueueCapacity => "journal_queue_capacity",
    }
}

/// Expected number of ConfigParam variants. Update when adding variants.
pub const EXPECTED_PARAM_COUNT: usize = 3;

/// All known `ConfigParam` variants (for exhaustive iteration in tests).
pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::ReservationDebounceMs,
    ConfigParam::LookupTimeoutMs,
    ConfigParam::JournalQueueCapacity,
];

/// Resolve a configuration value.
///
/// - If `value` is `Some`, returns that value (explicit config takes
///   precedence) after validation.
/// - If `value` is `None`, returns the parameter's default.
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<f64>,
) -> Result<f64, InvalidConfigError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(InvalidConfigError {
                param_name: param_name(param),
                reason: "is non-finite (NaN or Infinity)",
            });
        }
        if v < 0.0 {
            return Err(InvalidConfigError {
                param_name: param_name(param),
                reason: "is negative; all gate params are non-negative",
            });
        }
        return Ok(v);
    }
    Ok(default_for(param))
}

/// Build a core `GateConfig` from resolved values.
///
/// `debounce_ms` of `None` uses the default quiet period.
pub fn gate_config_from(
    debounce_ms: Option<f64>,
    failure_policy: FailurePolicy,
) -> Result<GateConfig, InvalidConfigError> {
    let quiet_ms = resolve_config_value(ConfigParam::ReservationDebounceMs, debounce_ms)?;
    Ok(GateConfig {
        quiet_period: Duration::from_millis(quiet_ms as u64),
        failure_policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_params_have_names() {
        for &param in ALL_PARAMS {
            let name = param_name(param);
            assert!(!name.is_empty(), "ConfigParam::{param:?} has empty name");
        }
    }

    #[test]
    fn all_params_listed_in_constant() {
        assert_eq!(
            ALL_PARAMS.len(),
            EXPECTED_PARAM_COUNT,
            "ALL_PARAMS length ({}) != EXPECTED_PARAM_COUNT ({}). \
             Did you add a ConfigParam variant without updating ALL_PARAMS?",
            ALL_PARAMS.len(),
            EXPECTED_PARAM_COUNT,
        );
        let mut names: Vec<&str> = ALL_PARAMS.iter().map(|&p| param_name(p)).collect();
        names.sort();
        names.dedup();
        assert_eq!(
            names.len(),
            ALL_PARAMS.len(),
            "ALL_PARAMS has duplicate entries"
        );
    }

    #[test]
    fn explicit_value_takes_precedence() {
        let resolved = resolve_config_value(ConfigParam::ReservationDebounceMs, Some(250.0));
        assert_eq!(resolved, Ok(250.0));
    }

    #[test]
    fn missing_value_resolves_to_default() {
        let resolved = resolve_config_value(ConfigParam::ReservationDebounceMs, None);
        assert_eq!(resolved, Ok(400.0));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        assert!(resolve_config_value(ConfigParam::LookupTimeoutMs, Some(f64::NAN)).is_err());
        assert!(resolve_config_value(ConfigParam::LookupTimeoutMs, Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn negative_value_is_rejected() {
        assert!(resolve_config_value(ConfigParam::JournalQueueCapacity, Some(-1.0)).is_err());
    }
}
