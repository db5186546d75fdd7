//! Persistence interface for teachers, students and registrations.
//!
//! The services in [`crate::service`] only talk to storage through the
//! [`Store`] trait. [`SqliteStore`] is the shipped implementation.

mod sqlite;

use std::future::Future;

pub use sqlite::SqliteStore;

use crate::Result;
use crate::model::{
    NewStudent, NewTeacher, Registration, Student, StudentId, StudentUpdate, Teacher, TeacherId,
};

/// Lookup and mutation operations the roster services need.
///
/// Implementations own entity lifecycles. Batch lookups (`*_by_emails`)
/// return only the entities that exist, in no particular order; an empty
/// input yields an empty result.
pub trait Store: Send + Sync {
    /// Find a teacher by exact email.
    fn find_teacher_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Teacher>>> + Send;

    /// Find all teachers whose email is in `emails`.
    fn find_teachers_by_emails(
        &self,
        emails: &[String],
    ) -> impl Future<Output = Result<Vec<Teacher>>> + Send;

    /// List every teacher, ordered by id.
    fn list_teachers(&self) -> impl Future<Output = Result<Vec<Teacher>>> + Send;

    /// Insert a teacher.
    ///
    /// Fails with [`crate::Error::Conflict`] if the email is taken.
    fn create_teacher(&self, teacher: NewTeacher)
    -> impl Future<Output = Result<Teacher>> + Send;

    /// Find a student by exact email.
    fn find_student_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Student>>> + Send;

    /// Find all students whose email is in `emails`.
    fn find_students_by_emails(
        &self,
        emails: &[String],
    ) -> impl Future<Output = Result<Vec<Student>>> + Send;

    /// List every student, ordered by id.
    fn list_students(&self) -> impl Future<Output = Result<Vec<Student>>> + Send;

    /// Insert a student. New students are not suspended.
    ///
    /// Fails with [`crate::Error::Conflict`] if the email is taken.
    fn create_student(&self, student: NewStudent)
    -> impl Future<Output = Result<Student>> + Send;

    /// Apply a partial update to a student.
    fn update_student(
        &self,
        id: StudentId,
        update: StudentUpdate,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Find the registration linking a teacher and a student.
    fn find_registration(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> impl Future<Output = Result<Option<Registration>>> + Send;

    /// Link a student to a teacher.
    ///
    /// Returns `None` if the pair was already linked, which happens when
    /// two callers race past [`Store::find_registration`].
    fn create_registration(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> impl Future<Output = Result<Option<Registration>>> + Send;

    /// Students registered to every one of `teacher_ids`.
    fn find_roster_intersection(
        &self,
        teacher_ids: &[TeacherId],
    ) -> impl Future<Output = Result<Vec<Student>>> + Send;

    /// Non-suspended students registered to `teacher_id`, in registration
    /// order.
    fn find_valid_roster(
        &self,
        teacher_id: TeacherId,
    ) -> impl Future<Output = Result<Vec<Student>>> + Send;
}
