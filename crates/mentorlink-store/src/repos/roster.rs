//! The mentor roster: which students a mentor currently holds, in order.

use crate::error::Result;
use crate::rows::get_string;

/// Student ids on a mentor's roster, in assignment order.
pub(crate) async fn list(conn: &libsql::Connection, mentor_id: &str) -> Result<Vec<String>> {
    let mut rows = conn
        .query(
            "SELECT student_id FROM mentor_students WHERE mentor_id = ?1 ORDER BY position",
            [mentor_id],
        )
        .await?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next().await? {
        ids.push(get_string(&row, 0, "mentor_students")?);
    }
    Ok(ids)
}

/// Every roster entry as `(mentor_id, student_id)`, grouped by mentor, in order.
pub(crate) async fn list_all(conn: &libsql::Connection) -> Result<Vec<(String, String)>> {
    let mut rows = conn
        .query(
            "SELECT mentor_id, student_id FROM mentor_students ORDER BY mentor_id, position",
            (),
        )
        .await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push((
            get_string(&row, 0, "mentor_students")?,
            get_string(&row, 1, "mentor_students")?,
        ));
    }
    Ok(entries)
}

/// Append a student to the end of a mentor's roster. No-op if already present.
pub(crate) async fn append(
    conn: &libsql::Connection,
    mentor_id: &str,
    student_id: &str,
) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO mentor_students (mentor_id, student_id, position)
         VALUES (?1, ?2, (SELECT COALESCE(MAX(position), 0) + 1 FROM mentor_students WHERE mentor_id = ?1))",
        libsql::params![mentor_id, student_id],
    )
    .await?;
    Ok(())
}

/// Remove a student from a mentor's roster.
pub(crate) async fn remove(
    conn: &libsql::Connection,
    mentor_id: &str,
    student_id: &str,
) -> Result<()> {
    conn.execute(
        "DELETE FROM mentor_students WHERE mentor_id = ?1 AND student_id = ?2",
        libsql::params![mentor_id, student_id],
    )
    .await?;
    Ok(())
}
