//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case::invalid(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case::missing(Error::not_found("missing"), ErrorCode::NotFound)]
#[case::unavailable(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case::internal(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_panics_on_empty_message() {
    let result = std::panic::catch_unwind(|| Error::new(ErrorCode::NotFound, ""));
    assert!(result.is_err());
}

#[rstest]
fn display_prefixes_the_code(base_error: Error) {
    assert_eq!(base_error.to_string(), "invalid_request: bad");
}

#[rstest]
fn details_are_attached(base_error: Error) {
    let error = base_error.with_details(json!({ "field": "title" }));
    assert_eq!(error.details(), Some(&json!({ "field": "title" })));
}

#[rstest]
fn serialises_without_absent_details(base_error: Error) {
    let value = serde_json::to_value(base_error).expect("serialise error");
    assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({ "code": "not_found", "message": "  " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_keeps_details() {
    let payload = json!({
        "code": "invalid_request",
        "message": "bad title",
        "details": { "field": "title" }
    });
    let error: Error = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "bad title");
    assert_eq!(error.details(), Some(&json!({ "field": "title" })));
}
