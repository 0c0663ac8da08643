//! Error types for mentorlink persistence and assignment rules.
//!
//! Lookup and business-rule failures are raised explicitly before any write
//! happens; everything the store itself reports is folded into
//! [`RosterError::StoreUnavailable`].

/// A specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors raised by the repositories and the assignment service.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No mentor exists with the given id (or the id is malformed).
    #[error("Mentor not found: '{id}'")]
    MentorNotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// No student exists with the given id (or the id is malformed).
    #[error("Student not found: '{id}'")]
    StudentNotFound {
        /// The id that failed to resolve.
        id: String,
    },

    // ========================================================================
    // Business Rule Errors
    // ========================================================================
    /// The student already has a current mentor.
    ///
    /// Only reassignment may change an existing assignment.
    #[error("Student '{student_id}' is already assigned to mentor '{mentor_id}'")]
    AlreadyAssigned {
        /// The student that was to be assigned.
        student_id: String,
        /// The mentor currently holding the student.
        mentor_id: String,
    },

    /// The submitted fields do not have the shape of the entity.
    #[error("Invalid {entity}: {message}")]
    ValidationFailure {
        /// Which entity was being created.
        entity: &'static str,
        /// Decoder or constraint message.
        message: String,
    },

    // ========================================================================
    // Store Errors
    // ========================================================================
    /// The backing libSQL database rejected or failed an operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] libsql::Error),

    /// Schema migration failed while opening the store.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored row could not be mapped onto its entity.
    #[error("Invalid record in '{table}': {message}")]
    InvalidRecord {
        /// Table the row was read from.
        table: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl RosterError {
    /// Creates a new `MentorNotFound` error.
    #[must_use]
    pub fn mentor_not_found(id: impl Into<String>) -> Self {
        Self::MentorNotFound { id: id.into() }
    }

    /// Creates a new `StudentNotFound` error.
    #[must_use]
    pub fn student_not_found(id: impl Into<String>) -> Self {
        Self::StudentNotFound { id: id.into() }
    }

    /// Creates a new `AlreadyAssigned` error.
    #[must_use]
    pub fn already_assigned(student_id: impl Into<String>, mentor_id: impl Into<String>) -> Self {
        Self::AlreadyAssigned {
            student_id: student_id.into(),
            mentor_id: mentor_id.into(),
        }
    }

    /// Creates a new `ValidationFailure` for the given entity.
    #[must_use]
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            entity,
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRecord` error.
    #[must_use]
    pub fn invalid_record(table: &'static str, message: impl std::fmt::Display) -> Self {
        Self::InvalidRecord {
            table,
            message: message.to_string(),
        }
    }

    /// Returns `true` if a referenced entity did not resolve.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MentorNotFound { .. } | Self::StudentNotFound { .. }
        )
    }

    /// Returns `true` if the error was caused by the request rather than the store.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.is_not_found() || matches!(self, Self::AlreadyAssigned { .. })
    }
}
