//! Todo domain service.
//!
//! [`TodoService`] implements both driving ports. It is the only place where
//! repository failures become [`DomainError`] values; the underlying cause is
//! logged here and never leaves the domain.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    CreateTodoRequest, TodoCommand, TodoQuery, TodoRepository, TodoRepositoryError, TodoResponse,
    UpdateTodoRequest,
};
use crate::domain::{DomainError, NewTodo, Todo, TodoId, UserId};

/// Map a repository failure to a domain error.
///
/// `not_found` is used for [`TodoRepositoryError::NotFound`]; every other
/// variant is logged and surfaces as an internal error carrying `internal`.
fn map_repository_error(
    error: TodoRepositoryError,
    not_found: impl FnOnce(TodoId) -> String,
    internal: &str,
) -> DomainError {
    match error {
        TodoRepositoryError::NotFound { id } => DomainError::not_found(not_found(id)),
        other => {
            error!(error = %other, "{internal}");
            DomainError::internal(internal)
        }
    }
}

/// Merge a partial update into `todo`.
///
/// Returns whether anything changed. A present title that is empty or equal
/// to the current one is ignored, as is a present flag equal to the current
/// value.
fn reconcile(todo: &mut Todo, request: UpdateTodoRequest) -> bool {
    let title = request
        .title
        .filter(|title| !title.is_empty() && *title != todo.title);
    let completed = request
        .completed
        .filter(|completed| *completed != todo.completed);
    let changed = title.is_present() || completed.is_present();

    title.apply_to(&mut todo.title);
    completed.apply_to(&mut todo.completed);
    changed
}

/// Todo service implementing [`TodoCommand`] and [`TodoQuery`].
#[derive(Clone)]
pub struct TodoService<R> {
    todo_repo: Arc<R>,
}

impl<R> TodoService<R> {
    /// Create a new service over the given repository.
    pub fn new(todo_repo: Arc<R>) -> Self {
        Self { todo_repo }
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoResponse, DomainError> {
        if request.title.trim().is_empty() {
            return Err(DomainError::invalid_request("title cannot be empty"));
        }

        let new_todo = NewTodo {
            title: request.title,
            completed: false,
            user_id: request.user_id.map_or(UserId::UNASSIGNED, UserId::new),
        };

        let stored = self.todo_repo.create(&new_todo).await.map_err(|err| {
            error!(error = %err, "failed to create todo item");
            DomainError::internal("failed to create todo item")
        })?;

        Ok(stored.into())
    }

    async fn update_todo(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> Result<TodoResponse, DomainError> {
        let mut todo = self.todo_repo.find_by_id(id).await.map_err(|err| {
            map_repository_error(
                err,
                |id| format!("todo with ID {id} not found for update"),
                "failed to retrieve todo item for update",
            )
        })?;

        if !reconcile(&mut todo, request) {
            debug!(%id, "update carried no changes");
            return Ok(todo.into());
        }

        let stored = self.todo_repo.update(&todo).await.map_err(|err| {
            map_repository_error(
                err,
                |id| format!("todo with ID {id} not found for update"),
                "failed to update todo item",
            )
        })?;

        Ok(stored.into())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), DomainError> {
        self.todo_repo.find_by_id(id).await.map_err(|err| {
            map_repository_error(
                err,
                |id| format!("todo with ID {id} not found for deletion"),
                "failed to check todo item before deletion",
            )
        })?;

        self.todo_repo.delete(id).await.map_err(|err| {
            error!(error = %err, %id, "failed to delete todo item");
            DomainError::internal("failed to delete todo item")
        })
    }
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn get_todo(&self, id: TodoId) -> Result<TodoResponse, DomainError> {
        let todo = self.todo_repo.find_by_id(id).await.map_err(|err| {
            map_repository_error(
                err,
                |id| format!("todo with ID {id} not found"),
                "failed to retrieve todo item",
            )
        })?;

        Ok(todo.into())
    }

    async fn list_todos(&self) -> Result<Vec<TodoResponse>, DomainError> {
        let todos = self.todo_repo.list_all().await.map_err(|err| {
            error!(error = %err, "failed to retrieve todo items");
            DomainError::internal("failed to retrieve todo items")
        })?;

        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
