//! Todo entity and its identifiers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Validation errors returned by the identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoIdValidationError {
    /// Identifiers are assigned by the store starting at one.
    #[error("todo id must be a positive integer")]
    Zero,
    /// The raw value is not an unsigned integer.
    #[error("todo id must be an unsigned integer")]
    NotNumeric,
}

/// Store-assigned todo identity.
///
/// Always positive. Construct it through [`TodoId::new`] or by parsing a
/// string so zero never reaches the service layer.
///
/// # Examples
/// ```
/// use todo_backend::domain::TodoId;
///
/// let id: TodoId = "12".parse().expect("positive id");
/// assert_eq!(id.get(), 12);
/// assert!("0".parse::<TodoId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(u64);

impl TodoId {
    /// Validate and construct a [`TodoId`].
    pub fn new(value: u64) -> Result<Self, TodoIdValidationError> {
        if value == 0 {
            return Err(TodoIdValidationError::Zero);
        }
        Ok(Self(value))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for TodoId {
    type Err = TodoIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<u64>()
            .map_err(|_| TodoIdValidationError::NotNumeric)?;
        Self::new(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Advisory owner of a todo. Zero means "unassigned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u64);

impl UserId {
    /// Owner used when a create request names no user.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw user identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Whether the todo has no owner.
    #[must_use]
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical todo record as held by the store.
///
/// ## Invariants
/// - `created_at <= updated_at`.
/// - `deleted_at` is `None` for every record a repository hands out; soft
///   deleted rows are invisible to the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert shape for a todo that has not been persisted yet.
///
/// The store assigns identity and timestamps and returns the full [`Todo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub user_id: UserId,
}
