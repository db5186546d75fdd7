//! Creating, listing and suspending teachers and students.

use tracing::info;

use crate::model::{NewStudent, NewTeacher, Student, StudentId, StudentUpdate, Teacher, TeacherId};
use crate::{EntityKind, Error, Result, Store};

fn require_name_and_email(name: &str, email: &str) -> Result<()> {
    if name.is_empty() || email.is_empty() {
        return Err(Error::InvalidInput("Name and email are required".to_string()));
    }
    Ok(())
}

/// Create a teacher.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `name` or `email` is empty.
/// - [`Error::Conflict`] if a teacher with this email exists.
/// - [`Error::Database`] if the store fails.
pub async fn create_teacher<S: Store>(store: &S, name: &str, email: &str) -> Result<TeacherId> {
    require_name_and_email(name, email)?;

    if store.find_teacher_by_email(email).await?.is_some() {
        return Err(Error::Conflict {
            kind: EntityKind::Teacher,
            email: email.to_string(),
        });
    }

    let teacher = store.create_teacher(NewTeacher::new(name, email)).await?;
    info!("Created teacher {} ({})", teacher.email, teacher.id);
    Ok(teacher.id)
}

/// Create a student. New students are not suspended.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `name` or `email` is empty.
/// - [`Error::Conflict`] if a student with this email exists.
/// - [`Error::Database`] if the store fails.
pub async fn create_student<S: Store>(store: &S, name: &str, email: &str) -> Result<StudentId> {
    require_name_and_email(name, email)?;

    if store.find_student_by_email(email).await?.is_some() {
        return Err(Error::Conflict {
            kind: EntityKind::Student,
            email: email.to_string(),
        });
    }

    let student = store.create_student(NewStudent::new(name, email)).await?;
    info!("Created student {} ({})", student.email, student.id);
    Ok(student.id)
}

/// All teachers, ordered by id.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn list_teachers<S: Store>(store: &S) -> Result<Vec<Teacher>> {
    store.list_teachers().await
}

/// All students, ordered by id.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn list_students<S: Store>(store: &S) -> Result<Vec<Student>> {
    store.list_students().await
}

/// Mark a student as suspended.
///
/// Suspending twice is harmless. Existing registrations are kept; the
/// student just stops receiving notifications.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `student_email` is empty.
/// - [`Error::NotFound`] if no student has this email.
/// - [`Error::Database`] if the store fails.
pub async fn suspend_student<S: Store>(store: &S, student_email: &str) -> Result<()> {
    if student_email.is_empty() {
        return Err(Error::InvalidInput("Student is required".to_string()));
    }

    let student = store
        .find_student_by_email(student_email)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Student, student_email))?;

    store
        .update_student(student.id, StudentUpdate::suspend())
        .await?;
    info!("Suspended student {}", student.email);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::service::testing::store;

    #[tokio::test]
    async fn test_create_and_list() {
        let store = store().await;

        let ken = create_teacher(&store, "Ken", "teacherken@gmail.com")
            .await
            .unwrap();
        let jon = create_student(&store, "Jon", "studentjon@gmail.com")
            .await
            .unwrap();

        let teachers = list_teachers(&store).await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].id, ken);

        let students = list_students(&store).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, jon);
        assert!(!students[0].is_suspended);
    }

    #[tokio::test]
    async fn test_duplicate_teacher_conflicts() {
        let store = store().await;
        create_teacher(&store, "Ken", "teacherken@gmail.com")
            .await
            .unwrap();

        let err = create_teacher(&store, "Ken 2", "teacherken@gmail.com")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Teacher already exists: teacherken@gmail.com");
    }

    #[tokio::test]
    async fn test_same_email_as_teacher_and_student() {
        let store = store().await;
        create_teacher(&store, "Ken", "ken@gmail.com").await.unwrap();

        assert!(create_student(&store, "Ken", "ken@gmail.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_fields_are_invalid() {
        let store = store().await;

        assert!(matches!(
            create_student(&store, "", "a@b.com").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            create_teacher(&store, "Ken", "").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_suspend_is_idempotent() {
        let store = store().await;
        create_student(&store, "Mary", "studentmary@gmail.com")
            .await
            .unwrap();

        suspend_student(&store, "studentmary@gmail.com").await.unwrap();
        suspend_student(&store, "studentmary@gmail.com").await.unwrap();

        let mary = store
            .find_student_by_email("studentmary@gmail.com")
            .await
            .unwrap()
            .unwrap();
        assert!(mary.is_suspended);
    }

    #[tokio::test]
    async fn test_suspend_unknown_student() {
        let store = store().await;

        let err = suspend_student(&store, "ghost@gmail.com").await.unwrap_err();
        assert_eq!(err.to_string(), "Student not found: ghost@gmail.com");
    }
}
