//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `diesel
//! print-schema` regenerates them from a live database.

diesel::table! {
    /// Todo items.
    ///
    /// Rows are never removed by the application; `deleted_at` marks them as
    /// gone and every query filters on it.
    todos (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        title -> Text,
        completed -> Bool,
        /// Advisory owner; zero means unassigned.
        user_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Soft deletion marker.
        deleted_at -> Nullable<Timestamptz>,
    }
}
