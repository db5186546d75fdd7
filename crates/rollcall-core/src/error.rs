//! Error types for the core library.

use thiserror::Error;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A teacher.
    Teacher,
    /// A student.
    Student,
}

impl EntityKind {
    /// Human-readable label, pluralized for batch lookups.
    #[must_use]
    pub const fn label(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Self::Teacher, false) => "Teacher",
            (Self::Teacher, true) => "Teachers",
            (Self::Student, false) => "Student",
            (Self::Student, true) => "Students",
        }
    }
}

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or empty.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced entities do not exist.
    ///
    /// `identifiers` lists exactly the missing emails, in caller order.
    #[error("{}", not_found_message(.kind, .plural, .identifiers))]
    NotFound {
        /// Kind of the missing entities.
        kind: EntityKind,
        /// Whether the lookup was a batch lookup.
        plural: bool,
        /// The emails that matched nothing.
        identifiers: Vec<String>,
    },

    /// An entity with this email already exists.
    #[error("{} already exists: {email}", .kind.label(false))]
    Conflict {
        /// Kind of the conflicting entity.
        kind: EntityKind,
        /// The duplicate email.
        email: String,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[allow(clippy::trivially_copy_pass_by_ref)] // Called with field references from the derive
fn not_found_message(kind: &EntityKind, plural: &bool, identifiers: &[String]) -> String {
    format!("{} not found: {}", kind.label(*plural), identifiers.join(", "))
}

impl Error {
    /// A single entity was not found.
    pub(crate) fn not_found(kind: EntityKind, email: &str) -> Self {
        Self::NotFound {
            kind,
            plural: false,
            identifiers: vec![email.to_string()],
        }
    }

    /// Some entities of a batch lookup were not found.
    pub(crate) const fn not_found_batch(kind: EntityKind, identifiers: Vec<String>) -> Self {
        Self::NotFound {
            kind,
            plural: true,
            identifiers,
        }
    }

    /// Whether the caller can fix this error by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
