//! Driven port for todo persistence.
//!
//! The [`TodoRepository`] trait is the only way the domain reaches storage.
//! Adapters hide soft deletion: a row carrying `deleted_at` behaves exactly like
//! a row that was never written.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{NewTodo, Todo, TodoId};

/// Errors raised by todo repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoRepositoryError {
    /// No live record carries the identifier.
    #[error("todo {id} not found")]
    NotFound { id: TodoId },
    /// The store could not be reached.
    #[error("todo repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("todo repository query failed: {message}")]
    Query { message: String },
}

impl TodoRepositoryError {
    /// Build a [`TodoRepositoryError::NotFound`].
    pub fn not_found(id: TodoId) -> Self {
        Self::NotFound { id }
    }

    /// Build a [`TodoRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`TodoRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for todo storage and retrieval.
///
/// # Visibility
///
/// Every method ignores soft-deleted rows. `find_by_id` and `update` report
/// [`TodoRepositoryError::NotFound`] for them, `list_all` omits them and
/// `delete` treats them as already gone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a new todo and return it with its assigned id and timestamps.
    async fn create(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError>;

    /// Fetch a live todo by id.
    async fn find_by_id(&self, id: TodoId) -> Result<Todo, TodoRepositoryError>;

    /// Fetch every live todo ordered by ascending id.
    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError>;

    /// Overwrite `title`, `completed` and `user_id` of a live todo.
    ///
    /// The adapter refreshes `updated_at` and returns the stored record.
    async fn update(&self, todo: &Todo) -> Result<Todo, TodoRepositoryError>;

    /// Soft delete a todo.
    ///
    /// Deleting an id that is absent or already deleted is not an error.
    async fn delete(&self, id: TodoId) -> Result<(), TodoRepositoryError>;
}

/// Fixture implementation backed by a plain map.
///
/// Useful in unit tests that need a working store without the richer
/// in-memory adapter. Deletion removes the entry outright.
#[derive(Debug, Default)]
pub struct FixtureTodoRepository {
    rows: Mutex<BTreeMap<TodoId, Todo>>,
}

#[async_trait]
impl TodoRepository for FixtureTodoRepository {
    async fn create(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut rows = self.rows.lock().await;
        let next = rows.keys().next_back().map_or(1, |id| id.get() + 1);
        let id = TodoId::new(next).map_err(|err| TodoRepositoryError::query(err.to_string()))?;
        let now = Utc::now();
        let stored = Todo {
            id,
            title: todo.title.clone(),
            completed: todo.completed,
            user_id: todo.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Todo, TodoRepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| TodoRepositoryError::not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn update(&self, todo: &Todo) -> Result<Todo, TodoRepositoryError> {
        let mut rows = self.rows.lock().await;
        let stored = rows
            .get_mut(&todo.id)
            .ok_or_else(|| TodoRepositoryError::not_found(todo.id))?;
        stored.title.clone_from(&todo.title);
        stored.completed = todo.completed;
        stored.user_id = todo.user_id;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoRepositoryError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }
}
