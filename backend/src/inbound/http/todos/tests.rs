//! Tests for todo HTTP handlers.

use super::*;
use crate::domain::ports::{FixtureStoreHealth, MockTodoCommand, MockTodoQuery};
use crate::domain::{DomainError, Patch, TodoId};
use crate::inbound::http::validation::INVALID_TODO_ID;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn sample_response(id: u64, completed: bool) -> TodoResponse {
    TodoResponse {
        id,
        title: "Buy milk".to_owned(),
        completed,
        user_id: 0,
        created_at: "2024-05-01T12:00:00Z".to_owned(),
        updated_at: "2024-05-01T12:00:00Z".to_owned(),
    }
}

fn test_app(
    command: MockTodoCommand,
    query: MockTodoQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(command),
        Arc::new(query),
        Arc::new(FixtureStoreHealth),
    );
    App::new()
        .app_data(web::Data::new(state))
        .service(create_todo)
        .service(list_todos)
        .service(get_todo)
        .service(update_todo)
        .service(delete_todo)
}

async fn error_message(response: actix_web::dev::ServiceResponse) -> String {
    let body: Value = actix_test::read_body_json(response).await;
    body.get("error")
        .and_then(Value::as_str)
        .expect("error envelope")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_body() {
    let mut command = MockTodoCommand::new();
    command
        .expect_create_todo()
        .withf(|request: &CreateTodoRequest| request.title == "Buy milk")
        .times(1)
        .return_once(|_| Ok(sample_response(1, false)));
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_payload(r#"{"title":"Buy milk"}"#)
        .insert_header(("Content-Type", "application/json"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["completed"], false);
}

#[rstest]
#[case("", "Request body must not be empty")]
#[case(r#"{"title":"#, "Request body contains badly-formed JSON")]
#[case(
    r#"{"title":"a","priority":1}"#,
    "Request body contains unknown field \"priority\""
)]
#[actix_web::test]
async fn create_rejects_bad_bodies_before_service(#[case] body: &'static str, #[case] message: &str) {
    let mut command = MockTodoCommand::new();
    command.expect_create_todo().times(0);
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, message);
}

#[rstest]
#[actix_web::test]
async fn create_maps_validation_error_to_400() {
    let mut command = MockTodoCommand::new();
    command
        .expect_create_todo()
        .times(1)
        .return_once(|_| Err(DomainError::invalid_request("title cannot be empty")));
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_payload(r#"{"title":"   "}"#)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "title cannot be empty");
}

#[rstest]
#[actix_web::test]
async fn list_returns_empty_array() {
    let mut query = MockTodoQuery::new();
    query
        .expect_list_todos()
        .times(1)
        .return_once(|| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(MockTodoCommand::new(), query)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/todos").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[case("/todos/0")]
#[case("/todos/abc")]
#[case("/todos/-4")]
#[actix_web::test]
async fn invalid_ids_are_rejected_before_service(#[case] uri: &str) {
    let mut query = MockTodoQuery::new();
    query.expect_get_todo().times(0);
    let app = actix_test::init_service(test_app(MockTodoCommand::new(), query)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, INVALID_TODO_ID);
}

#[rstest]
#[actix_web::test]
async fn get_maps_not_found_to_404() {
    let mut query = MockTodoQuery::new();
    query
        .expect_get_todo()
        .withf(|id: &TodoId| id.get() == 7)
        .times(1)
        .return_once(|_| Err(DomainError::not_found("todo with ID 7 not found")));
    let app = actix_test::init_service(test_app(MockTodoCommand::new(), query)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/todos/7").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await, "todo with ID 7 not found");
}

#[rstest]
#[actix_web::test]
async fn get_maps_internal_error_to_500() {
    let mut query = MockTodoQuery::new();
    query
        .expect_get_todo()
        .times(1)
        .return_once(|_| Err(DomainError::internal("failed to retrieve todo item")));
    let app = actix_test::init_service(test_app(MockTodoCommand::new(), query)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/todos/7").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, "failed to retrieve todo item");
}

#[rstest]
#[actix_web::test]
async fn update_passes_presence_through() {
    let mut command = MockTodoCommand::new();
    command
        .expect_update_todo()
        .withf(|id: &TodoId, request: &UpdateTodoRequest| {
            id.get() == 3
                && request.completed == Patch::Present(false)
                && request.title == Patch::Absent
        })
        .times(1)
        .return_once(|_, _| Ok(sample_response(3, false)));
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let request = actix_test::TestRequest::put()
        .uri("/todos/3")
        .set_payload(r#"{"completed":false,"title":null}"#)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn update_reports_wrong_typed_field() {
    let mut command = MockTodoCommand::new();
    command.expect_update_todo().times(0);
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let request = actix_test::TestRequest::put()
        .uri("/todos/3")
        .set_payload(r#"{"completed":"yes"}"#)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = error_message(response).await;
    assert!(
        message.starts_with("Request body contains an invalid value for the \"completed\" field"),
        "unexpected message: {message}"
    );
}

#[rstest]
#[actix_web::test]
async fn delete_returns_204_without_body() {
    let mut command = MockTodoCommand::new();
    command
        .expect_delete_todo()
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/todos/5").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = actix_test::read_body(response).await;
    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn delete_maps_not_found_to_404() {
    let mut command = MockTodoCommand::new();
    command
        .expect_delete_todo()
        .times(1)
        .return_once(|_| Err(DomainError::not_found("todo with ID 5 not found for deletion")));
    let app = actix_test::init_service(test_app(command, MockTodoQuery::new())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/todos/5").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(response).await,
        "todo with ID 5 not found for deletion"
    );
}
