//! Roster operations.
//!
//! Each operation is a stateless async function that takes the [`Store`]
//! explicitly, validates its input, and recomputes its answer from the store
//! on every call.
//!
//! [`Store`]: crate::Store

pub mod common;
pub mod directory;
pub mod notification;
pub mod registration;

use std::collections::HashSet;

pub use common::common_students;
pub use directory::{create_student, create_teacher, list_students, list_teachers, suspend_student};
pub use notification::recipients_for;
pub use registration::register;

/// Remove duplicates, keeping the first occurrence of each email.
fn dedup_emails(emails: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    emails
        .iter()
        .filter(|email| seen.insert(email.as_str()))
        .cloned()
        .collect()
}

/// The requested emails that are not in `found`, in request order.
fn missing_emails<'a>(
    requested: &[String],
    found: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let found: HashSet<&str> = found.into_iter().collect();
    requested
        .iter()
        .filter(|email| !found.contains(email.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use crate::model::{NewStudent, NewTeacher, Student, Teacher};
    use crate::{SqliteStore, Store};

    pub async fn store() -> SqliteStore {
        SqliteStore::in_memory().await.unwrap()
    }

    pub async fn teacher(store: &SqliteStore, email: &str) -> Teacher {
        store
            .create_teacher(NewTeacher::new("Teacher", email))
            .await
            .unwrap()
    }

    pub async fn student(store: &SqliteStore, email: &str) -> Student {
        store
            .create_student(NewStudent::new("Student", email))
            .await
            .unwrap()
    }

    pub fn emails(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }
}
