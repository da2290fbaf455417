//! Driving port for changing todos.
//!
//! HTTP handlers and other inbound adapters call [`TodoCommand`] with the
//! request DTOs defined here. The DTOs reject unknown fields; partial updates
//! use [`Patch`] so an omitted field is distinguishable from a zero value.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::domain::{DomainError, Patch, TodoId};

use super::TodoResponse;

/// Request to create a todo.
///
/// An omitted or `null` `title` decodes as an empty string and is rejected
/// by the service rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Owner of the todo; `0` or omitted means unassigned.
    #[serde(default)]
    pub user_id: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Partial update of a todo.
///
/// Omitted and `null` fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Buy oat milk")]
    pub title: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub completed: Patch<bool>,
}

/// Domain use-case port for creating, updating and deleting todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Validate and persist a new todo.
    async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoResponse, DomainError>;

    /// Reconcile a partial update against the stored todo.
    ///
    /// Returns the current state unchanged when nothing differs.
    async fn update_todo(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> Result<TodoResponse, DomainError>;

    /// Soft delete a todo that currently exists.
    async fn delete_todo(&self, id: TodoId) -> Result<(), DomainError>;
}
