//! Registering students to a teacher.

use tracing::{debug, info};

use super::{dedup_emails, missing_emails};
use crate::{EntityKind, Error, Result, Store};

/// Register students to a teacher.
///
/// Both the teacher and every student must already exist; this is checked
/// before anything is written. Pairs that are already linked are skipped,
/// so calling this twice has the same effect as calling it once.
///
/// Links are created one student at a time and are not wrapped in a
/// transaction. If the store fails partway through, the links created so
/// far remain; calling `register` again with the same input finishes the
/// job.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `teacher_email` or `student_emails` is empty,
///   or if any student email is empty.
/// - [`Error::NotFound`] naming the teacher, or naming exactly the student
///   emails that matched nothing, in request order.
/// - [`Error::Database`] if the store fails.
pub async fn register<S: Store>(
    store: &S,
    teacher_email: &str,
    student_emails: &[String],
) -> Result<()> {
    if teacher_email.is_empty()
        || student_emails.is_empty()
        || student_emails.iter().any(String::is_empty)
    {
        return Err(Error::InvalidInput(
            "Teacher and students are required".to_string(),
        ));
    }

    let teacher = store
        .find_teacher_by_email(teacher_email)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Teacher, teacher_email))?;

    let requested = dedup_emails(student_emails);
    let students = store.find_students_by_emails(&requested).await?;

    if students.len() != requested.len() {
        let missing = missing_emails(&requested, students.iter().map(|s| s.email.as_str()));
        return Err(Error::not_found_batch(EntityKind::Student, missing));
    }

    for student in &students {
        if store
            .find_registration(teacher.id, student.id)
            .await?
            .is_some()
        {
            debug!("{} already registered to {}", student.email, teacher.email);
            continue;
        }

        match store.create_registration(teacher.id, student.id).await? {
            Some(_) => info!("Registered {} to {}", student.email, teacher.email),
            None => debug!(
                "{} was registered to {} concurrently",
                student.email, teacher.email
            ),
        }
    }

    Ok(())
}
