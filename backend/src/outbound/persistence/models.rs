//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::todos;

/// Row struct for reading from the todos table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating todo records.
///
/// Identity and timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow<'a> {
    pub title: &'a str,
    pub completed: bool,
    pub user_id: i64,
}

/// Changeset applied by updates.
///
/// `updated_at` is assigned separately from the database clock.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub(crate) struct TodoUpdate<'a> {
    pub title: &'a str,
    pub completed: bool,
    pub user_id: i64,
}
