//! Student repository: list, create, find by id.

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{is_valid_id, NewStudent, Student};
use crate::repos::generate_id;
use crate::rows::{collect_students, row_to_student, STUDENT_COLUMNS};
use crate::store::Store;

/// Look up a student. Malformed ids resolve to `None`.
pub(crate) async fn find(conn: &libsql::Connection, id: &str) -> Result<Option<Student>> {
    if !is_valid_id(id) {
        return Ok(None);
    }
    let mut rows = conn
        .query(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_student(&row)?)),
        None => Ok(None),
    }
}

impl Store {
    /// Every student, in creation order.
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let conn = self.connect().await?;
        let rows = conn
            .query(
                &format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY rowid"),
                (),
            )
            .await?;
        let students = collect_students(rows).await?;
        debug!(count = students.len(), "Listed students");
        Ok(students)
    }

    /// Insert a new student with no mentor and no previous mentor.
    pub async fn create_student(&self, fields: NewStudent) -> Result<Student> {
        let conn = self.connect().await?;
        let id = generate_id(&conn).await?;

        conn.execute(
            "INSERT INTO students (id, name) VALUES (?1, ?2)",
            libsql::params![id.as_str(), fields.name.as_str()],
        )
        .await?;

        info!(student_id = %id, name = %fields.name, "Student created");
        Ok(Student {
            id,
            name: fields.name,
            mentor: None,
            previous_mentor: None,
        })
    }

    /// Look up a student by id.
    pub async fn find_student(&self, id: &str) -> Result<Option<Student>> {
        let conn = self.connect().await?;
        find(&conn, id).await
    }
}
