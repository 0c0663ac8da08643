//! Typed entities stored by mentorlink.
//!
//! Entities serialize to camelCase JSON; relationship fields hold ids, never
//! embedded documents. Expansion into full entities is done by the
//! assignment service on request.

use serde::{Deserialize, Serialize};

/// Length of every generated entity id (12 random bytes, hex encoded).
pub const ID_LEN: usize = 24;

/// Returns `true` if `id` has the shape of a generated entity id.
///
/// Ids that fail this check can never resolve, so lookups treat them as
/// absent without touching the store.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// A guidance provider holding a roster of currently assigned students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ids of currently assigned students, in assignment order.
    #[serde(default)]
    pub students: Vec<String>,
}

/// A mentee with at most one current and one previous mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the current mentor.
    #[serde(default)]
    pub mentor: Option<String>,
    /// Id of the most recently replaced mentor.
    #[serde(default)]
    pub previous_mentor: Option<String>,
}

/// Caller-supplied fields for a new mentor.
///
/// Unknown fields are ignored; the roster always starts empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMentor {
    /// Display name. Absent means empty.
    #[serde(default)]
    pub name: String,
}

/// Caller-supplied fields for a new student.
///
/// Unknown fields are ignored; relationship fields always start empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    /// Display name. Absent means empty.
    #[serde(default)]
    pub name: String,
}

impl NewMentor {
    /// Creates the fields for a mentor with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NewStudent {
    /// Creates the fields for a student with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
