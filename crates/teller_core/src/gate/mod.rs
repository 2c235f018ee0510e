pub mod controller;
pub mod debounce;
pub mod machine;
pub mod sequence;

pub use controller::{
    DEFAULT_QUIET_PERIOD_MS, GateConfig, GateMetrics, GateObserver, GateState, LookupStart,
    NoopObserver, ReservationGate, ReservationLookup, drive_at,
};
pub use debounce::DebounceTimer;
pub use machine::{GateEvent, GateMachine, GatePhase, GateTransition};
pub use sequence::{LookupSequencer, LookupTicket};
