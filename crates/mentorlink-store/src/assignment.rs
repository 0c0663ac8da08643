//! Mentor-student assignment rules and relationship queries.
//!
//! Both mutations touch a student row and at least one roster, and run in a
//! single IMMEDIATE transaction: the write lock is taken before the
//! preconditions are read, so two concurrent assignments of one student
//! cannot both observe it unassigned, and a failure between the writes
//! leaves nothing behind.
//!
//! Reassignment keeps exactly one prior mentor (`previous_mentor` is
//! overwritten, never appended) and removes the student from the old
//! mentor's roster so roster and student never disagree.

use std::future::Future;

use libsql::TransactionBehavior;
use tracing::{debug, info, warn};

use crate::error::{Result, RosterError};
use crate::models::{Mentor, Student};
use crate::repos::{mentor, roster, student};
use crate::rows::collect_students;
use crate::store::Store;

impl Store {
    /// Assign an unassigned student to a mentor.
    ///
    /// Returns the mentor with the student appended to its roster.
    ///
    /// # Errors
    ///
    /// - `MentorNotFound` / `StudentNotFound` if either id does not resolve.
    /// - `AlreadyAssigned` if the student already has a mentor, whichever
    ///   mentor that is.
    pub async fn assign_student_to_mentor(
        &self,
        mentor_id: &str,
        student_id: &str,
    ) -> Result<Mentor> {
        let conn = self.connect().await?;
        let mentor = in_transaction(&conn, |tx| async move {
            mentor::find(tx, mentor_id)
                .await?
                .ok_or_else(|| RosterError::mentor_not_found(mentor_id))?;
            let student = student::find(tx, student_id)
                .await?
                .ok_or_else(|| RosterError::student_not_found(student_id))?;

            if let Some(current) = student.mentor {
                warn!(
                    student_id,
                    current_mentor = %current,
                    requested_mentor = mentor_id,
                    "Rejecting assignment: student already has a mentor"
                );
                return Err(RosterError::already_assigned(student_id, current));
            }

            tx.execute(
                "UPDATE students SET mentor_id = ?1 WHERE id = ?2",
                libsql::params![mentor_id, student_id],
            )
            .await?;
            roster::append(tx, mentor_id, student_id).await?;

            mentor::find(tx, mentor_id)
                .await?
                .ok_or_else(|| RosterError::mentor_not_found(mentor_id))
        })
        .await?;

        info!(
            mentor_id,
            student_id,
            roster_size = mentor.students.len(),
            "Student assigned to mentor"
        );
        Ok(mentor)
    }

    /// Move a student to a new mentor, recording the one it replaces.
    ///
    /// Valid whether or not the student currently has a mentor. Returns the
    /// updated student.
    ///
    /// # Errors
    ///
    /// `StudentNotFound` / `MentorNotFound` if either id does not resolve.
    pub async fn reassign_student_mentor(
        &self,
        student_id: &str,
        new_mentor_id: &str,
    ) -> Result<Student> {
        let conn = self.connect().await?;
        let student = in_transaction(&conn, |tx| async move {
            let current = student::find(tx, student_id)
                .await?
                .ok_or_else(|| RosterError::student_not_found(student_id))?;
            mentor::find(tx, new_mentor_id)
                .await?
                .ok_or_else(|| RosterError::mentor_not_found(new_mentor_id))?;

            // A student with no mentor keeps whatever history it has.
            let previous = current.mentor.as_deref().or(current.previous_mentor.as_deref());

            tx.execute(
                "UPDATE students SET mentor_id = ?1, previous_mentor_id = ?2 WHERE id = ?3",
                libsql::params![new_mentor_id, previous, student_id],
            )
            .await?;

            if let Some(old) = current.mentor.as_deref() {
                if old != new_mentor_id {
                    roster::remove(tx, old, student_id).await?;
                }
            }
            roster::append(tx, new_mentor_id, student_id).await?;

            student::find(tx, student_id)
                .await?
                .ok_or_else(|| RosterError::student_not_found(student_id))
        })
        .await?;

        info!(
            student_id,
            mentor_id = new_mentor_id,
            previous_mentor = ?student.previous_mentor,
            "Student reassigned"
        );
        Ok(student)
    }

    /// The students on a mentor's roster, fully expanded, in roster order.
    ///
    /// # Errors
    ///
    /// `MentorNotFound` if the mentor id does not resolve.
    pub async fn students_of_mentor(&self, mentor_id: &str) -> Result<Vec<Student>> {
        let conn = self.connect().await?;
        mentor::find(&conn, mentor_id)
            .await?
            .ok_or_else(|| RosterError::mentor_not_found(mentor_id))?;

        let rows = conn
            .query(
                "SELECT s.id, s.name, s.mentor_id, s.previous_mentor_id
                 FROM mentor_students ms
                 JOIN students s ON s.id = ms.student_id
                 WHERE ms.mentor_id = ?1
                 ORDER BY ms.position",
                [mentor_id],
            )
            .await?;
        let students = collect_students(rows).await?;

        debug!(mentor_id, count = students.len(), "Expanded mentor roster");
        Ok(students)
    }

    /// The mentor a student had before its latest reassignment, if any.
    ///
    /// # Errors
    ///
    /// `StudentNotFound` if the student id does not resolve.
    pub async fn previous_mentor_of(&self, student_id: &str) -> Result<Option<Mentor>> {
        let conn = self.connect().await?;
        let student = student::find(&conn, student_id)
            .await?
            .ok_or_else(|| RosterError::student_not_found(student_id))?;

        let Some(previous_id) = student.previous_mentor else {
            debug!(student_id, "Student has no previous mentor");
            return Ok(None);
        };
        mentor::find(&conn, &previous_id).await
    }
}

/// Run `body` inside an IMMEDIATE transaction, committing on success and
/// rolling back on any error.
async fn in_transaction<'c, T, F, Fut>(conn: &'c libsql::Connection, body: F) -> Result<T>
where
    F: FnOnce(&'c libsql::Connection) -> Fut,
    Fut: Future<Output = Result<T>> + 'c,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .await?;

    match body(conn).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(error = %rollback, "Rollback failed");
            }
            Err(e)
        }
    }
}
