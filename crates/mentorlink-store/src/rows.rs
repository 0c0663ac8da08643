//! Row-to-entity mapping.
//!
//! Every query selects columns in a fixed order; these helpers turn the
//! column-indexed `libsql::Row` into typed entities and report mapping
//! failures with the table they came from.

use crate::error::{Result, RosterError};
use crate::models::Student;

/// Column list matching [`row_to_student`].
pub(crate) const STUDENT_COLUMNS: &str = "id, name, mentor_id, previous_mentor_id";

/// Read a required TEXT column.
pub(crate) fn get_string(row: &libsql::Row, idx: i32, table: &'static str) -> Result<String> {
    row.get::<String>(idx)
        .map_err(|e| RosterError::invalid_record(table, format!("column {idx}: {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
pub(crate) fn get_opt_string(
    row: &libsql::Row,
    idx: i32,
    table: &'static str,
) -> Result<Option<String>> {
    match row.get::<Option<String>>(idx) {
        Ok(Some(s)) if s.is_empty() => Ok(None),
        Ok(other) => Ok(other),
        Err(e) => Err(RosterError::invalid_record(
            table,
            format!("column {idx}: {e}"),
        )),
    }
}

/// Map a row selected with [`STUDENT_COLUMNS`] onto a [`Student`].
pub(crate) fn row_to_student(row: &libsql::Row) -> Result<Student> {
    Ok(Student {
        id: get_string(row, 0, "students")?,
        name: get_string(row, 1, "students")?,
        mentor: get_opt_string(row, 2, "students")?,
        previous_mentor: get_opt_string(row, 3, "students")?,
    })
}

/// Drain a result set of students.
pub(crate) async fn collect_students(mut rows: libsql::Rows) -> Result<Vec<Student>> {
    let mut students = Vec::new();
    while let Some(row) = rows.next().await? {
        students.push(row_to_student(&row)?);
    }
    Ok(students)
}
