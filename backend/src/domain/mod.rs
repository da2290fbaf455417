//! Domain primitives, ports and services.
//!
//! Purpose: define the todo entity, the partial-update wrapper, the error
//! taxonomy and the service that enforces business rules. Nothing in this
//! module knows about HTTP or SQL.
//!
//! Public surface:
//! - `Todo`, `NewTodo`, `TodoId`, `UserId`: entity model.
//! - `Patch`: presence wrapper for partial updates.
//! - `DomainError`, `ErrorCode`: transport agnostic failures.
//! - `TodoService`: implementation of the driving ports.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod patch;
pub mod ports;
pub mod todo;
pub mod todo_service;
pub mod trace_id;

pub use self::error::{DomainError, ErrorCode};
pub use self::patch::Patch;
pub use self::todo::{NewTodo, Todo, TodoId, TodoIdValidationError, UserId};
pub use self::todo_service::TodoService;
pub use self::trace_id::TraceId;
