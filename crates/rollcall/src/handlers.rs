//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use rollcall_core::{SqliteStore, Student, Teacher, service};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

type StoreState = State<Arc<SqliteStore>>;

/// Body of `POST /api/teachers` and `POST /api/students`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// Response to a successful creation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreatedResponse {
    /// Confirmation text.
    pub message: String,
    /// Id of the new entity.
    pub id: i64,
}

/// Body of `POST /api/register`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Teacher email.
    #[serde(default)]
    pub teacher: String,
    /// Student emails.
    #[serde(default)]
    pub students: Vec<String>,
}

/// Response of `GET /api/commonstudents`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommonStudentsResponse {
    /// Emails of students shared by every requested teacher.
    pub students: Vec<String>,
}

/// Body of `POST /api/suspend`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SuspendRequest {
    /// Student email.
    #[serde(default)]
    pub student: String,
}

/// Body of `POST /api/retrievefornotifications`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Teacher email.
    #[serde(default)]
    pub teacher: String,
    /// Notification text, possibly containing `@<email>` mentions.
    #[serde(default)]
    pub notification: String,
}

/// Response of `POST /api/retrievefornotifications`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RecipientsResponse {
    /// Emails that should receive the notification.
    pub recipients: Vec<String>,
}

pub async fn health() -> &'static str {
    "Health check"
}

pub async fn create_teacher(
    State(store): StoreState,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = payload?;
    let id = service::create_teacher(&*store, &request.name, &request.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Teacher created successfully".to_string(),
            id: id.0,
        }),
    ))
}

pub async fn list_teachers(State(store): StoreState) -> Result<Json<Vec<Teacher>>, ApiError> {
    Ok(Json(service::list_teachers(&*store).await?))
}

pub async fn create_student(
    State(store): StoreState,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = payload?;
    let id = service::create_student(&*store, &request.name, &request.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Student created successfully".to_string(),
            id: id.0,
        }),
    ))
}

pub async fn list_students(State(store): StoreState) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(service::list_students(&*store).await?))
}

pub async fn register_students(
    State(store): StoreState,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    service::register(&*store, &request.teacher, &request.students).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `?teacher=a&teacher=b`; values arrive percent-decoded.
pub async fn common_students(
    State(store): StoreState,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CommonStudentsResponse>, ApiError> {
    let Query(params) = query?;
    let teachers: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == "teacher")
        .map(|(_, value)| value)
        .collect();

    let students = service::common_students(&*store, &teachers).await?;
    Ok(Json(CommonStudentsResponse { students }))
}

pub async fn suspend_student(
    State(store): StoreState,
    payload: Result<Json<SuspendRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    service::suspend_student(&*store, &request.student).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn retrieve_for_notifications(
    State(store): StoreState,
    payload: Result<Json<NotificationRequest>, JsonRejection>,
) -> Result<Json<RecipientsResponse>, ApiError> {
    let Json(request) = payload?;
    let recipients =
        service::recipients_for(&*store, &request.teacher, &request.notification).await?;

    Ok(Json(RecipientsResponse { recipients }))
}
