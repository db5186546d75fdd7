//! Domain models.
//!
//! Teachers and students are identified externally by email; the numeric
//! ids are assigned by the store.

mod registration;
mod student;
mod teacher;

pub use registration::{Registration, RegistrationId};
pub use student::{NewStudent, Student, StudentId, StudentUpdate};
pub use teacher::{NewTeacher, Teacher, TeacherId};
