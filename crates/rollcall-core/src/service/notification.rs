//! Resolving who receives a teacher's notification.

use std::collections::HashSet;

use tracing::debug;

use crate::mention::extract_mentions;
use crate::{EntityKind, Error, Result, Store};

/// Emails that should receive `notification` from the given teacher.
///
/// Recipients are the teacher's non-suspended students (in roster order),
/// followed by any other non-suspended students mentioned in the text as
/// `@<email>` (in the order they are mentioned). Mentions of unknown emails
/// are dropped. Each email appears once.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if either argument is empty.
/// - [`Error::NotFound`] if the teacher does not exist.
/// - [`Error::Database`] if the store fails.
pub async fn recipients_for<S: Store>(
    store: &S,
    teacher_email: &str,
    notification: &str,
) -> Result<Vec<String>> {
    if teacher_email.is_empty() || notification.is_empty() {
        return Err(Error::InvalidInput(
            "Teacher and notification are required".to_string(),
        ));
    }

    let teacher = store
        .find_teacher_by_email(teacher_email)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Teacher, teacher_email))?;

    let mut recipients: Vec<String> = store
        .find_valid_roster(teacher.id)
        .await?
        .into_iter()
        .map(|s| s.email)
        .collect();

    if !notification.contains('@') {
        return Ok(recipients);
    }

    let mentioned = extract_mentions(notification);
    let reachable: HashSet<String> = store
        .find_students_by_emails(&mentioned)
        .await?
        .into_iter()
        .filter(|s| !s.is_suspended)
        .map(|s| s.email)
        .collect();
    debug!(
        "{} of {} mentioned students can be notified",
        reachable.len(),
        mentioned.len()
    );

    let mut seen: HashSet<String> = recipients.iter().cloned().collect();
    for email in mentioned {
        if reachable.contains(&email) && seen.insert(email.clone()) {
            recipients.push(email);
        }
    }

    Ok(recipients)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::service::testing::{emails, store, student, teacher};
    use crate::service::{register, suspend_student};

    async fn classroom() -> crate::SqliteStore {
        let store = store().await;
        teacher(&store, "t1@school.edu").await;
        student(&store, "s1@school.edu").await;
        student(&store, "s2@x.com").await;
        register(&store, "t1@school.edu", &emails(&["s1@school.edu"]))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_roster_then_mentions() {
        let store = classroom().await;

        let recipients = recipients_for(&store, "t1@school.edu", "Hi @s2@x.com")
            .await
            .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu", "s2@x.com"]));
    }

    #[tokio::test]
    async fn test_without_mentions_returns_roster() {
        let store = classroom().await;

        let recipients = recipients_for(&store, "t1@school.edu", "Hey everybody")
            .await
            .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu"]));
    }

    #[tokio::test]
    async fn test_mentioned_roster_member_appears_once() {
        let store = classroom().await;

        let recipients = recipients_for(
            &store,
            "t1@school.edu",
            "Hello @s1@school.edu and @s2@x.com and @s1@school.edu",
        )
        .await
        .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu", "s2@x.com"]));
    }

    #[tokio::test]
    async fn test_suspended_mention_is_excluded() {
        let store = classroom().await;
        suspend_student(&store, "s2@x.com").await.unwrap();

        let recipients = recipients_for(&store, "t1@school.edu", "Hi @s2@x.com")
            .await
            .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu"]));
    }

    #[tokio::test]
    async fn test_suspended_roster_member_is_excluded() {
        let store = classroom().await;
        suspend_student(&store, "s1@school.edu").await.unwrap();

        let recipients = recipients_for(&store, "t1@school.edu", "Hi @s1@school.edu")
            .await
            .unwrap();

        assert!(recipients.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mention_is_dropped() {
        let store = classroom().await;

        let recipients = recipients_for(&store, "t1@school.edu", "Hi @ghost@x.com @s2@x.com")
            .await
            .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu", "s2@x.com"]));
    }

    #[tokio::test]
    async fn test_mentions_keep_text_order() {
        let store = classroom().await;
        student(&store, "a@x.com").await;
        student(&store, "b@x.com").await;

        let recipients = recipients_for(&store, "t1@school.edu", "@b@x.com then @a@x.com")
            .await
            .unwrap();

        assert_eq!(recipients, emails(&["s1@school.edu", "b@x.com", "a@x.com"]));
    }

    #[tokio::test]
    async fn test_unknown_teacher() {
        let store = classroom().await;

        let err = recipients_for(&store, "ghost@school.edu", "Hi")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Teacher not found: ghost@school.edu");
    }

    #[tokio::test]
    async fn test_empty_arguments_are_invalid() {
        let store = classroom().await;

        assert!(matches!(
            recipients_for(&store, "", "Hi").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            recipients_for(&store, "t1@school.edu", "").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
    }
}
