//! Students shared by every one of several teachers.

use super::{dedup_emails, missing_emails};
use crate::model::TeacherId;
use crate::{EntityKind, Error, Result, Store};

/// Emails of the students registered to all of `teacher_emails`.
///
/// Suspension is ignored. The result only shrinks as teachers are added and
/// does not depend on the order of `teacher_emails`.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `teacher_emails` is empty or holds an empty
///   email.
/// - [`Error::NotFound`] naming exactly the unknown teacher emails, in
///   request order.
/// - [`Error::Database`] if the store fails.
pub async fn common_students<S: Store>(
    store: &S,
    teacher_emails: &[String],
) -> Result<Vec<String>> {
    if teacher_emails.is_empty() || teacher_emails.iter().any(String::is_empty) {
        return Err(Error::InvalidInput("Teacher is required".to_string()));
    }

    let requested = dedup_emails(teacher_emails);
    let teachers = store.find_teachers_by_emails(&requested).await?;

    if teachers.len() != requested.len() {
        let missing = missing_emails(&requested, teachers.iter().map(|t| t.email.as_str()));
        return Err(Error::not_found_batch(EntityKind::Teacher, missing));
    }

    let teacher_ids: Vec<TeacherId> = teachers.iter().map(|t| t.id).collect();
    let students = store.find_roster_intersection(&teacher_ids).await?;

    Ok(dedup_emails(
        &students.into_iter().map(|s| s.email).collect::<Vec<_>>(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::service::register;
    use crate::service::testing::{emails, store, student, teacher};

    /// Ken teaches Jon, Hon and Agnes; Joe teaches Jon and Agnes; Mia teaches Jon.
    async fn classroom() -> crate::SqliteStore {
        let store = store().await;
        for email in ["ken@school.edu", "joe@school.edu", "mia@school.edu"] {
            teacher(&store, email).await;
        }
        for email in ["jon@school.edu", "hon@school.edu", "agnes@school.edu"] {
            student(&store, email).await;
        }

        register(
            &store,
            "ken@school.edu",
            &emails(&["jon@school.edu", "hon@school.edu", "agnes@school.edu"]),
        )
        .await
        .unwrap();
        register(
            &store,
            "joe@school.edu",
            &emails(&["jon@school.edu", "agnes@school.edu"]),
        )
        .await
        .unwrap();
        register(&store, "mia@school.edu", &emails(&["jon@school.edu"]))
            .await
            .unwrap();

        store
    }

    fn as_set(values: Vec<String>) -> HashSet<String> {
        values.into_iter().collect()
    }

    #[tokio::test]
    async fn test_single_teacher_returns_roster() {
        let store = classroom().await;

        let students = common_students(&store, &emails(&["ken@school.edu"]))
            .await
            .unwrap();

        assert_eq!(
            as_set(students),
            as_set(emails(&["jon@school.edu", "hon@school.edu", "agnes@school.edu"]))
        );
    }

    #[tokio::test]
    async fn test_intersection_of_two_teachers() {
        let store = store().await;
        teacher(&store, "t1@school.edu").await;
        teacher(&store, "t2@school.edu").await;
        student(&store, "s1@school.edu").await;
        student(&store, "s2@school.edu").await;
        register(
            &store,
            "t1@school.edu",
            &emails(&["s1@school.edu", "s2@school.edu"]),
        )
        .await
        .unwrap();
        register(&store, "t2@school.edu", &emails(&["s1@school.edu"]))
            .await
            .unwrap();

        let students = common_students(&store, &emails(&["t1@school.edu", "t2@school.edu"]))
            .await
            .unwrap();

        assert_eq!(students, emails(&["s1@school.edu"]));
    }

    #[tokio::test]
    async fn test_adding_teachers_never_grows_result() {
        let store = classroom().await;

        let one = as_set(common_students(&store, &emails(&["ken@school.edu"])).await.unwrap());
        let two = as_set(
            common_students(&store, &emails(&["ken@school.edu", "joe@school.edu"]))
                .await
                .unwrap(),
        );
        let three = as_set(
            common_students(
                &store,
                &emails(&["ken@school.edu", "joe@school.edu", "mia@school.edu"]),
            )
            .await
            .unwrap(),
        );

        assert!(two.is_subset(&one));
        assert!(three.is_subset(&two));
        assert_eq!(three, as_set(emails(&["jon@school.edu"])));
    }

    #[tokio::test]
    async fn test_argument_order_does_not_matter() {
        let store = classroom().await;

        let forward = common_students(&store, &emails(&["ken@school.edu", "joe@school.edu"]))
            .await
            .unwrap();
        let backward = common_students(&store, &emails(&["joe@school.edu", "ken@school.edu"]))
            .await
            .unwrap();

        assert_eq!(as_set(forward), as_set(backward));
    }

    #[tokio::test]
    async fn test_repeated_teacher_counts_once() {
        let store = classroom().await;

        let students = common_students(&store, &emails(&["mia@school.edu", "mia@school.edu"]))
            .await
            .unwrap();

        assert_eq!(students, emails(&["jon@school.edu"]));
    }

    #[tokio::test]
    async fn test_suspended_students_still_count() {
        let store = classroom().await;
        crate::service::suspend_student(&store, "jon@school.edu")
            .await
            .unwrap();

        let students = common_students(&store, &emails(&["mia@school.edu"]))
            .await
            .unwrap();

        assert_eq!(students, emails(&["jon@school.edu"]));
    }

    #[tokio::test]
    async fn test_unknown_teachers_reported_in_order() {
        let store = classroom().await;

        let err = common_students(
            &store,
            &emails(&["zed@school.edu", "ken@school.edu", "amy@school.edu"]),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Teachers not found: zed@school.edu, amy@school.edu"
        );
    }

    #[tokio::test]
    async fn test_empty_list_is_invalid() {
        let store = store().await;

        let err = common_students(&store, &[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_blank_teacher_email_is_invalid() {
        let store = classroom().await;

        let err = common_students(&store, &emails(&[""])).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = common_students(&store, &emails(&["ken@school.edu", ""]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
