//! Tests for the gate lifecycle machine.
//!
//! `Idle -> Checking -> {Blocked | Allowed}`, back to `Idle` on clear,
//! `Disposed` terminal. Out-of-place events are ignored, never panic.

use teller_core::gate::{GateEvent, GateMachine, GatePhase, GateTransition};

#[test]
fn starts_idle() {
    let machine = GateMachine::new();
    assert_eq!(machine.phase(), GatePhase::Idle);
    assert_eq!(machine.transition_count(), 0);
}

#[test]
fn lookup_then_blocked() {
    let mut machine = GateMachine::new();

    let issued = machine.apply(GateEvent::LookupIssued);
    assert_eq!(
        issued,
        GateTransition::Transitioned {
            from: GatePhase::Idle,
            to: GatePhase::Checking,
        }
    );

    let decided = machine.apply(GateEvent::DecidedBlocked);
    assert_eq!(
        decided,
        GateTransition::Transitioned {
            from: GatePhase::Checking,
            to: GatePhase::Blocked,
        }
    );
}

#[test]
fn lookup_then_allowed() {
    let mut machine = GateMachine::new();
    machine.apply(GateEvent::LookupIssued);
    machine.apply(GateEvent::DecidedAllowed);
    assert_eq!(machine.phase(), GatePhase::Allowed);
}

#[test]
fn checking_is_reentered_when_a_new_lookup_supersedes() {
    let mut machine = GateMachine::new();
    machine.apply(GateEvent::LookupIssued);

    let reissued = machine.apply(GateEvent::LookupIssued);
    assert_eq!(
        reissued,
        GateTransition::Transitioned {
            from: GatePhase::Checking,
            to: GatePhase::Checking,
        }
    );
}

#[test]
fn clear_returns_to_idle_from_any_phase() {
    for warmup in [
        vec![],
        vec![GateEvent::LookupIssued],
        vec![GateEvent::LookupIssued, GateEvent::DecidedBlocked],
        vec![GateEvent::LookupIssued, GateEvent::DecidedAllowed],
    ] {
        let mut machine = GateMachine::new();
        for event in warmup {
            machine.apply(event);
        }
        machine.apply(GateEvent::IdentifierCleared);
        assert_eq!(machine.phase(), GatePhase::Idle);
    }
}

#[test]
fn decision_without_a_lookup_is_ignored() {
    let mut machine = GateMachine::new();

    let result = machine.apply(GateEvent::DecidedBlocked);
    assert!(matches!(result, GateTransition::Ignored { .. }));
    assert_eq!(machine.phase(), GatePhase::Idle);
}

#[test]
fn disposed_is_terminal() {
    let mut machine = GateMachine::new();
    machine.apply(GateEvent::Disposed);
    assert!(machine.phase().is_terminal());

    for event in [
        GateEvent::IdentifierCleared,
        GateEvent::LookupIssued,
        GateEvent::DecidedBlocked,
        GateEvent::DecidedAllowed,
        GateEvent::Disposed,
    ] {
        let result = machine.apply(event);
        match result {
            GateTransition::Ignored { current, .. } => {
                assert_eq!(current, GatePhase::Disposed);
            }
            other => panic!("expected Ignored after dispose, got {other:?}"),
        }
    }
    assert_eq!(machine.phase(), GatePhase::Disposed);
}

#[test]
fn transitions_are_recorded() {
    let mut machine = GateMachine::new();
    machine.apply(GateEvent::LookupIssued);
    machine.apply(GateEvent::DecidedAllowed);
    machine.apply(GateEvent::IdentifierCleared);
    assert_eq!(machine.transition_count(), 3);
}
