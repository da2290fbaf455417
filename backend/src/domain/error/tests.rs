//! Tests for the domain error taxonomy.

use super::*;
use rstest::rstest;

#[rstest]
#[case(DomainError::invalid_request("title cannot be empty"), ErrorCode::InvalidRequest)]
#[case(DomainError::not_found("todo with ID 1 not found"), ErrorCode::NotFound)]
#[case(DomainError::internal("failed to create todo item"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn display_renders_message_only() {
    let error = DomainError::not_found("todo with ID 42 not found");
    assert_eq!(error.to_string(), "todo with ID 42 not found");
}

#[rstest]
fn errors_compare_by_code_and_message() {
    assert_eq!(
        DomainError::internal("boom"),
        DomainError::new(ErrorCode::InternalError, "boom")
    );
    assert_ne!(DomainError::internal("boom"), DomainError::not_found("boom"));
}
