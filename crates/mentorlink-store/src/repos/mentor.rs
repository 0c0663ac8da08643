//! Mentor repository: list, create, find by id.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{is_valid_id, Mentor, NewMentor};
use crate::repos::{generate_id, roster};
use crate::rows::get_string;
use crate::store::Store;

/// Look up a mentor and its roster. Malformed ids resolve to `None`.
pub(crate) async fn find(conn: &libsql::Connection, id: &str) -> Result<Option<Mentor>> {
    if !is_valid_id(id) {
        return Ok(None);
    }
    let mut rows = conn
        .query("SELECT id, name FROM mentors WHERE id = ?1", [id])
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let id = get_string(&row, 0, "mentors")?;
    let name = get_string(&row, 1, "mentors")?;
    let students = roster::list(conn, &id).await?;
    Ok(Some(Mentor { id, name, students }))
}

impl Store {
    /// Every mentor with its roster, in creation order.
    pub async fn list_mentors(&self) -> Result<Vec<Mentor>> {
        let conn = self.connect().await?;

        let mut rosters: HashMap<String, Vec<String>> = HashMap::new();
        for (mentor_id, student_id) in roster::list_all(&conn).await? {
            rosters.entry(mentor_id).or_default().push(student_id);
        }

        let mut rows = conn
            .query("SELECT id, name FROM mentors ORDER BY rowid", ())
            .await?;
        let mut mentors = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = get_string(&row, 0, "mentors")?;
            let name = get_string(&row, 1, "mentors")?;
            let students = rosters.remove(&id).unwrap_or_default();
            mentors.push(Mentor { id, name, students });
        }

        debug!(count = mentors.len(), "Listed mentors");
        Ok(mentors)
    }

    /// Insert a new mentor with an empty roster.
    pub async fn create_mentor(&self, fields: NewMentor) -> Result<Mentor> {
        let conn = self.connect().await?;
        let id = generate_id(&conn).await?;

        conn.execute(
            "INSERT INTO mentors (id, name) VALUES (?1, ?2)",
            libsql::params![id.as_str(), fields.name.as_str()],
        )
        .await?;

        info!(mentor_id = %id, name = %fields.name, "Mentor created");
        Ok(Mentor {
            id,
            name: fields.name,
            students: Vec::new(),
        })
    }

    /// Look up a mentor by id.
    pub async fn find_mentor(&self, id: &str) -> Result<Option<Mentor>> {
        let conn = self.connect().await?;
        find(&conn, id).await
    }
}
