//! Registration (teacher ↔ student link) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StudentId, TeacherId};

/// Unique identifier for a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub i64);

/// A teacher has enrolled a student.
///
/// At most one registration exists per `(teacher_id, student_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: RegistrationId,
    /// The enrolling teacher.
    pub teacher_id: TeacherId,
    /// The enrolled student.
    pub student_id: StudentId,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last modified.
    pub updated_at: DateTime<Utc>,
}
