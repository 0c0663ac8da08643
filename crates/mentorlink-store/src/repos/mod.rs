//! Entity repositories.
//!
//! Each module pairs connection-level functions (usable inside a
//! transaction) with the `impl Store` methods that run them on a fresh
//! connection.

pub(crate) mod mentor;
pub(crate) mod roster;
pub(crate) mod student;

use crate::error::{Result, RosterError};

/// Generate a new entity id via libSQL: 12 random bytes as lowercase hex.
pub(crate) async fn generate_id(conn: &libsql::Connection) -> Result<String> {
    let mut rows = conn
        .query("SELECT lower(hex(randomblob(12)))", ())
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| RosterError::invalid_record("randomblob", "no row returned"))?;
    crate::rows::get_string(&row, 0, "randomblob")
}
