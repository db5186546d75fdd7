//! # rollcall-core
//!
//! Core business logic for `Rollcall`, a teacher/student roster service.
//!
//! This crate provides:
//! - Domain models (teachers, students, registrations)
//! - The [`Store`] persistence interface and a `SQLite` implementation
//! - **Registration** - idempotent enrollment of students to a teacher
//! - **Common Students** - roster intersection across several teachers
//! - **Notification Recipients** - non-suspended roster plus `@`-mentions
//! - **Directory** - creating, listing and suspending entities
//!
//! Every operation is a free function that receives the store explicitly:
//!
//! ```ignore
//! use rollcall_core::{SqliteStore, service};
//!
//! let store = SqliteStore::new("rollcall.db").await?;
//! service::register(&store, "teacher@school.edu", &students).await?;
//! let recipients = service::recipients_for(&store, "teacher@school.edu", "Hi @a@b.com").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod mention;
pub mod model;
pub mod service;
pub mod store;

pub use error::{EntityKind, Error, Result};
pub use mention::extract_mentions;
pub use model::{
    NewStudent, NewTeacher, Registration, RegistrationId, Student, StudentId, StudentUpdate,
    Teacher, TeacherId,
};
pub use service::{
    common_students, create_student, create_teacher, list_students, list_teachers,
    recipients_for, register, suspend_student,
};
pub use store::{SqliteStore, Store};
