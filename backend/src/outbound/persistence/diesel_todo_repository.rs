//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Soft deletion is enforced here: every read and update filters on
//! `deleted_at IS NULL`, and `delete` only stamps the marker.

use async_trait::async_trait;
use diesel::dsl::{self, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, Todo, TodoId, UserId};

use super::models::{NewTodoRow, TodoRow, TodoUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the `TodoRepository` port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain todo repository errors.
fn map_pool_error(error: PoolError) -> TodoRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TodoRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain todo repository errors.
fn map_diesel_error(error: diesel::result::Error) -> TodoRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TodoRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => TodoRepositoryError::query("database query error"),
        _ => TodoRepositoryError::query("database error"),
    }
}

/// Column value for a domain user id.
fn user_id_for_db(user_id: UserId) -> Result<i64, TodoRepositoryError> {
    i64::try_from(user_id.get())
        .map_err(|_| TodoRepositoryError::query(format!("user id {user_id} exceeds column range")))
}

/// Column value for a domain todo id.
///
/// `None` means no row can carry the id, so lookups report it as missing.
fn todo_id_for_db(id: TodoId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

/// Assignment stamping `updated_at` with the database clock.
///
/// `created_at` comes from the column default, so both timestamps share
/// one clock.
fn touch_updated_at() -> dsl::Eq<todos::updated_at, now> {
    todos::updated_at.eq(now)
}

/// Assignment marking a row as deleted at the database's current time.
fn soft_delete_marker() -> dsl::Eq<todos::deleted_at, now> {
    todos::deleted_at.eq(now)
}

/// Convert a database row to a domain todo.
fn row_to_todo(row: TodoRow) -> Result<Todo, TodoRepositoryError> {
    let id = u64::try_from(row.id)
        .ok()
        .and_then(|raw| TodoId::new(raw).ok())
        .ok_or_else(|| TodoRepositoryError::query(format!("invalid todo id {} in row", row.id)))?;
    let user_id = u64::try_from(row.user_id).map_err(|_| {
        TodoRepositoryError::query(format!("invalid user id {} in row {}", row.user_id, row.id))
    })?;

    Ok(Todo {
        id,
        title: row.title,
        completed: row.completed,
        user_id: UserId::new(user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn create(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let new_row = NewTodoRow {
            title: todo.title.as_str(),
            completed: todo.completed,
            user_id: user_id_for_db(todo.user_id)?,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TodoRow = diesel::insert_into(todos::table)
            .values(&new_row)
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_todo(row)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Todo, TodoRepositoryError> {
        let Some(db_id) = todo_id_for_db(id) else {
            return Err(TodoRepositoryError::not_found(id));
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TodoRow> = todos::table
            .filter(todos::id.eq(db_id))
            .filter(todos::deleted_at.is_null())
            .select(TodoRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map_or_else(|| Err(TodoRepositoryError::not_found(id)), row_to_todo)
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = todos::table
            .filter(todos::deleted_at.is_null())
            .order(todos::id.asc())
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: &Todo) -> Result<Todo, TodoRepositoryError> {
        let Some(db_id) = todo_id_for_db(todo.id) else {
            return Err(TodoRepositoryError::not_found(todo.id));
        };
        let changes = TodoUpdate {
            title: todo.title.as_str(),
            completed: todo.completed,
            user_id: user_id_for_db(todo.user_id)?,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TodoRow> = diesel::update(
            todos::table
                .filter(todos::id.eq(db_id))
                .filter(todos::deleted_at.is_null()),
        )
        .set((&changes, touch_updated_at()))
        .returning(TodoRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map_or_else(|| Err(TodoRepositoryError::not_found(todo.id)), row_to_todo)
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoRepositoryError> {
        let Some(db_id) = todo_id_for_db(id) else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            todos::table
                .filter(todos::id.eq(db_id))
                .filter(todos::deleted_at.is_null()),
        )
        .set(soft_delete_marker())
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if affected == 0 {
            debug!(%id, "delete matched no live todo");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for row conversion and error mapping.

    use super::*;
    use chrono::{TimeZone, Utc};
    use diesel::debug_query;
    use diesel::pg::Pg;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> TodoRow {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        TodoRow {
            id: 12,
            title: "Buy milk".to_owned(),
            completed: true,
            user_id: 3,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[rstest]
    fn row_converts_to_domain(row: TodoRow) {
        let todo = row_to_todo(row).expect("valid row");
        assert_eq!(todo.id.get(), 12);
        assert_eq!(todo.user_id, UserId::new(3));
        assert!(todo.completed);
        assert!(todo.deleted_at.is_none());
    }

    #[rstest]
    #[case(0, 1)]
    #[case(-5, 1)]
    #[case(1, -1)]
    fn row_with_out_of_range_ids_is_rejected(
        mut row: TodoRow,
        #[case] id: i64,
        #[case] user_id: i64,
    ) {
        row.id = id;
        row.user_id = user_id;
        let err = row_to_todo(row).expect_err("invalid row");
        assert!(matches!(err, TodoRepositoryError::Query { .. }));
    }

    #[rstest]
    fn ids_beyond_column_range_have_no_row() {
        let id = TodoId::new(u64::MAX).expect("positive id");
        assert_eq!(todo_id_for_db(id), None);
        assert!(user_id_for_db(UserId::new(u64::MAX)).is_err());
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, TodoRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, TodoRepositoryError::Query { .. }));
    }

    #[rstest]
    fn update_stamps_updated_at_with_database_clock() {
        let changes = TodoUpdate {
            title: "Buy milk",
            completed: true,
            user_id: 3,
        };
        let statement = diesel::update(todos::table.filter(todos::id.eq(12_i64)))
            .set((&changes, touch_updated_at()));
        let sql = debug_query::<Pg, _>(&statement).to_string();

        assert!(
            sql.contains(r#""updated_at" = CURRENT_TIMESTAMP"#),
            "unexpected SQL: {sql}"
        );
        assert!(!sql.contains("created_at"), "unexpected SQL: {sql}");
    }

    #[rstest]
    fn delete_stamps_deleted_at_with_database_clock() {
        let statement = diesel::update(
            todos::table
                .filter(todos::id.eq(12_i64))
                .filter(todos::deleted_at.is_null()),
        )
        .set(soft_delete_marker());
        let sql = debug_query::<Pg, _>(&statement).to_string();

        assert!(
            sql.contains(r#"SET "deleted_at" = CURRENT_TIMESTAMP"#),
            "unexpected SQL: {sql}"
        );
    }
}
