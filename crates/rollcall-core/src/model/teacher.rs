//! Teacher model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub i64);

impl TeacherId {
    /// Create a new teacher ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Store-assigned identifier.
    pub id: TeacherId,
    /// Display name.
    pub name: String,
    /// Email address, unique among teachers.
    pub email: String,
    /// When the teacher was created.
    pub created_at: DateTime<Utc>,
    /// When the teacher was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl NewTeacher {
    /// Creates a new teacher payload.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
