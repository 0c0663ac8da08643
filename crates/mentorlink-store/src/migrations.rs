//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! store open. All statements use `IF NOT EXISTS` so re-running is harmless.

use crate::error::{Result, RosterError};

/// Initial schema: mentors, students, mentor roster.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Run all embedded migrations in sequence.
pub(crate) async fn run(conn: &libsql::Connection) -> Result<()> {
    conn.execute_batch(MIGRATION_001)
        .await
        .map_err(|e| RosterError::Migration(format!("001_initial: {e}")))?;
    Ok(())
}
