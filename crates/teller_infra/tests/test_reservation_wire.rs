//! Tests for the check-customer-reservation wire model.

use teller_core::compliance::{LookupError, ReservationStatus, should_block_exchange};
use teller_infra::amlo::parse_reservation_check;

#[test]
fn full_body_parses_and_projects_to_a_snapshot() {
    let body = r#"{
        "has_reservation": true,
        "reservation_id": "AMLO-2024-0117",
        "status": "pending",
        "customer_name": "Somchai J.",
        "reserved_at_ms": 1718000000000
    }"#;

    let response = parse_reservation_check(body).expect("valid body");
    assert!(response.has_reservation);
    assert_eq!(response.customer_name.as_deref(), Some("Somchai J."));
    assert_eq!(response.reserved_at_ms, Some(1_718_000_000_000));

    let snapshot = response.into_snapshot().expect("reservation present");
    assert_eq!(snapshot.reservation_id.as_deref(), Some("AMLO-2024-0117"));
    assert_eq!(snapshot.status, ReservationStatus::Pending);
}

#[test]
fn has_reservation_false_projects_to_none() {
    let body = r#"{"has_reservation": false, "status": "pending"}"#;
    let response = parse_reservation_check(body).expect("valid body");

    // Other fields are irrelevant once has_reservation is false.
    assert!(response.into_snapshot().is_none());
}

#[test]
fn missing_has_reservation_field_is_falsy() {
    let body = r#"{"status": "pending"}"#;
    let response = parse_reservation_check(body).expect("valid body");
    assert!(!response.has_reservation);
    assert!(response.into_snapshot().is_none());
}

#[test]
fn empty_object_is_falsy() {
    let response = parse_reservation_check("{}").expect("valid body");
    assert!(response.into_snapshot().is_none());
}

#[test]
fn unknown_status_is_preserved_and_does_not_block() {
    let body = r#"{"has_reservation": true, "status": "escalated"}"#;
    let snapshot = parse_reservation_check(body)
        .expect("valid body")
        .into_snapshot()
        .expect("reservation present");

    assert_eq!(
        snapshot.status,
        ReservationStatus::Other("escalated".to_string())
    );
    assert!(!should_block_exchange(Some(&snapshot)));
}

#[test]
fn reservation_without_status_does_not_block() {
    let body = r#"{"has_reservation": true, "reservation_id": "R-1"}"#;
    let snapshot = parse_reservation_check(body)
        .expect("valid body")
        .into_snapshot()
        .expect("reservation present");

    assert!(matches!(snapshot.status, ReservationStatus::Other(_)));
    assert!(!should_block_exchange(Some(&snapshot)));
}

#[test]
fn unknown_fields_are_ignored() {
    let body = r#"{"has_reservation": true, "status": "approved", "branch_code": "BKK-04"}"#;
    let snapshot = parse_reservation_check(body)
        .expect("valid body")
        .into_snapshot()
        .expect("reservation present");
    assert_eq!(snapshot.status, ReservationStatus::Approved);
}

#[test]
fn non_json_body_is_a_malformed_response() {
    let result = parse_reservation_check("<html>bad gateway</html>");
    match result {
        Err(LookupError::MalformedResponse(_)) => {}
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[test]
fn wrongly_typed_field_is_a_malformed_response() {
    let result = parse_reservation_check(r#"{"has_reservation": "yes"}"#);
    assert!(matches!(result, Err(LookupError::MalformedResponse(_))));
}
