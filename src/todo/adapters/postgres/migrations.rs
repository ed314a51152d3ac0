//! Embedded schema migrations for the `PostgreSQL` store.

use diesel::QueryResult;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// SQL creating the `lists` and `tasks` tables and their indexes.
pub const CREATE_LISTS_AND_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_lists_and_tasks/up.sql");

/// Applies every schema migration.
///
/// Migrations are idempotent, so this is safe to run on each start-up.
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn apply_migrations(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(CREATE_LISTS_AND_TASKS_SQL)
}
