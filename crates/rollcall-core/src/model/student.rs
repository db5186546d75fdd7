//! Student model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl StudentId {
    /// Create a new student ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned identifier.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Email address, unique among students.
    pub email: String,
    /// Suspended students are left out of notification recipients.
    pub is_suspended: bool,
    /// When the student was created.
    pub created_at: DateTime<Utc>,
    /// When the student was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl NewStudent {
    /// Creates a new student payload.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Partial update of a student. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New suspension flag.
    pub is_suspended: Option<bool>,
}

impl StudentUpdate {
    /// An update that only marks the student as suspended.
    #[must_use]
    pub const fn suspend() -> Self {
        Self {
            name: None,
            is_suspended: Some(true),
        }
    }

    /// Returns true if the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_suspended.is_none()
    }
}
