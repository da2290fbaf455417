//! Todo HTTP handlers.
//!
//! ```text
//! POST   /todos
//! GET    /todos
//! GET    /todos/{id}
//! PUT    /todos/{id}
//! DELETE /todos/{id}
//! ```
//!
//! Handlers only decode, validate the path and delegate to the driving ports.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::json_body::StrictJson;
use crate::inbound::http::response::{ErrorBody, json_response};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_todo_id;

/// Create a todo.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Created todo", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todos")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: StrictJson<CreateTodoRequest>,
) -> ApiResult<HttpResponse> {
    let created = state.todos.create_todo(payload.into_inner()).await?;
    Ok(json_response(StatusCode::CREATED, &created))
}

/// List every todo.
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos", body = [TodoResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let todos = state.todos_query.list_todos().await?;
    Ok(json_response(StatusCode::OK, &todos))
}

/// Fetch a single todo.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo", body = TodoResponse),
        (status = 400, description = "Invalid todo ID", body = ErrorBody),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
#[get("/todos/{id}")]
pub async fn get_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    let todo = state.todos_query.get_todo(id).await?;
    Ok(json_response(StatusCode::OK, &todo))
}

/// Apply a partial update to a todo.
///
/// Omitted and `null` fields are left unchanged. An update that changes
/// nothing returns the current state.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Updated todo", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[put("/todos/{id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: StrictJson<UpdateTodoRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    let updated = state.todos.update_todo(id, payload.into_inner()).await?;
    Ok(json_response(StatusCode::OK, &updated))
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Invalid todo ID", body = ErrorBody),
        (status = 404, description = "Todo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todos/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    state.todos.delete_todo(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
