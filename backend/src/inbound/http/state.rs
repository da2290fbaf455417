//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::TodoService;
use crate::domain::ports::{
    FixtureStoreHealth, FixtureTodoRepository, StoreHealth, TodoCommand, TodoQuery, TodoRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub todos: Arc<dyn TodoCommand>,
    pub todos_query: Arc<dyn TodoQuery>,
    pub health: Arc<dyn StoreHealth>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(
        todos: Arc<dyn TodoCommand>,
        todos_query: Arc<dyn TodoQuery>,
        health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            todos,
            todos_query,
            health,
        }
    }

    /// Wire a [`TodoService`] over `repository` into both driving ports.
    pub fn from_repository<R>(repository: Arc<R>, health: Arc<dyn StoreHealth>) -> Self
    where
        R: TodoRepository + 'static,
    {
        let service = Arc::new(TodoService::new(repository));
        Self::new(service.clone(), service, health)
    }

    /// State backed by fixtures, for tests that do not need a real store.
    #[must_use]
    pub fn fixture() -> Self {
        Self::from_repository(
            Arc::new(FixtureTodoRepository::default()),
            Arc::new(FixtureStoreHealth),
        )
    }
}
