//! Driving port for reading todos.
//!
//! Also defines [`TodoResponse`], the outward shape shared by every operation
//! that returns a todo.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, Todo, TodoId};

/// Todo as presented to clients.
///
/// Timestamps are RFC 3339 strings in UTC with whole seconds, for example
/// `2024-05-01T12:00:00Z`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TodoResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub completed: bool,
    #[schema(example = 0)]
    pub user_id: u64,
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub created_at: String,
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub updated_at: String,
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.get(),
            title: todo.title,
            completed: todo.completed,
            user_id: todo.user_id.get(),
            created_at: format_timestamp(todo.created_at),
            updated_at: format_timestamp(todo.updated_at),
        }
    }
}

/// Domain use-case port for fetching todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// Fetch a single todo.
    async fn get_todo(&self, id: TodoId) -> Result<TodoResponse, DomainError>;

    /// Fetch every todo in store order.
    async fn list_todos(&self) -> Result<Vec<TodoResponse>, DomainError>;
}
