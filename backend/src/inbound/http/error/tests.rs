//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(DomainError::invalid_request("title cannot be empty"), StatusCode::BAD_REQUEST)]
#[case(DomainError::not_found("todo with ID 1 not found"), StatusCode::NOT_FOUND)]
#[case(
    DomainError::internal("failed to retrieve todo items"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn status_code_matches_error_code(#[case] error: DomainError, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn body_carries_message_only() {
    let error = DomainError::not_found("todo with ID 12 not found");
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body, json!({"error": "todo with ID 12 not found"}));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_their_generic_message() {
    let error = DomainError::internal("failed to delete todo item");
    let response = ResponseError::error_response(&error);

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["error"], "failed to delete todo item");
}
