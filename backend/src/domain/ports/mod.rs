//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`TodoCommand`], [`TodoQuery`]) are called by inbound
//! adapters. Driven ports ([`TodoRepository`], [`StoreHealth`]) are
//! implemented by outbound adapters.

mod store_health;
mod todo_command;
mod todo_query;
mod todo_repository;

#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{
    FixtureStoreHealth, HealthReport, STATUS_DOWN, STATUS_KEY, STATUS_UP, StoreHealth, is_down,
};
#[cfg(test)]
pub use todo_command::MockTodoCommand;
pub use todo_command::{CreateTodoRequest, TodoCommand, UpdateTodoRequest};
#[cfg(test)]
pub use todo_query::MockTodoQuery;
pub use todo_query::{TodoQuery, TodoResponse};
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{FixtureTodoRepository, TodoRepository, TodoRepositoryError};
