//! Shared validation helpers for inbound HTTP adapters.

use tracing::debug;

use crate::domain::{DomainError, TodoId};

/// Message returned for any path identifier that is not a positive integer.
pub(crate) const INVALID_TODO_ID: &str = "Invalid todo ID provided";

/// Parse the `{id}` path segment.
///
/// Runs before any service call so malformed identifiers never reach the
/// domain.
pub(crate) fn parse_todo_id(raw: &str) -> Result<TodoId, DomainError> {
    raw.parse::<TodoId>().map_err(|err| {
        debug!(raw, error = %err, "rejected todo id");
        DomainError::invalid_request(INVALID_TODO_ID)
    })
}
