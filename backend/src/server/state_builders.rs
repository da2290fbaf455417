//! Builder for the HTTP state from the configured store.

use std::sync::Arc;

use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::memory::InMemoryTodoRepository;
use todo_backend::outbound::persistence::{DbPool, DieselTodoRepository};

/// Wire the todo service over PostgreSQL when a pool is available, otherwise
/// over a fresh in-memory store.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => HttpState::from_repository(
            Arc::new(DieselTodoRepository::new(pool.clone())),
            Arc::new(pool.clone()),
        ),
        None => {
            let repository = Arc::new(InMemoryTodoRepository::default());
            HttpState::from_repository(repository.clone(), repository)
        }
    }
}
