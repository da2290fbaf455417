//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM.
//! - **memory**: in-process store used when no database is configured.
//!
//! Adapters are thin translators between domain types and storage. They
//! contain no business logic.

pub mod memory;
pub mod persistence;
