//! In-process todo store.
//!
//! Used when no database is configured and by the end-to-end test suite. It
//! keeps the same observable behaviour as the PostgreSQL adapter: ascending
//! ids that are never reused, soft deletion and refreshed `updated_at` on
//! update.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{
    HealthReport, STATUS_KEY, STATUS_UP, StoreHealth, TodoRepository, TodoRepositoryError,
};
use crate::domain::{NewTodo, Todo, TodoId};

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<TodoId, Todo>,
    last_id: u64,
}

impl Store {
    fn live(&self, id: TodoId) -> Option<&Todo> {
        self.rows.get(&id).filter(|todo| todo.deleted_at.is_none())
    }
}

/// Todo repository held entirely in memory.
///
/// Clones share the same store.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    store: Arc<RwLock<Store>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryTodoRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            clock,
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut store = self.store.write().await;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| TodoRepositoryError::query("todo id sequence exhausted"))?;
        let id = TodoId::new(next).map_err(|err| TodoRepositoryError::query(err.to_string()))?;
        let now = self.clock.utc();
        let stored = Todo {
            id,
            title: todo.title.clone(),
            completed: todo.completed,
            user_id: todo.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        store.last_id = next;
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Todo, TodoRepositoryError> {
        self.store
            .read()
            .await
            .live(id)
            .cloned()
            .ok_or_else(|| TodoRepositoryError::not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|todo| todo.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn update(&self, todo: &Todo) -> Result<Todo, TodoRepositoryError> {
        let now = self.clock.utc();
        let mut store = self.store.write().await;
        let stored = store
            .rows
            .get_mut(&todo.id)
            .filter(|stored| stored.deleted_at.is_none())
            .ok_or_else(|| TodoRepositoryError::not_found(todo.id))?;
        stored.title.clone_from(&todo.title);
        stored.completed = todo.completed;
        stored.user_id = todo.user_id;
        stored.updated_at = now;
        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoRepositoryError> {
        let now = self.clock.utc();
        let mut store = self.store.write().await;
        if let Some(stored) = store.rows.get_mut(&id) {
            stored.deleted_at.get_or_insert(now);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for InMemoryTodoRepository {
    async fn health(&self) -> HealthReport {
        let store = self.store.read().await;
        let live = store
            .rows
            .values()
            .filter(|todo| todo.deleted_at.is_none())
            .count();
        HealthReport::from([
            (STATUS_KEY.to_owned(), STATUS_UP.to_owned()),
            ("message".to_owned(), "It's healthy".to_owned()),
            ("todos".to_owned(), live.to_string()),
        ])
    }
}
