//! `SQLite` implementation of [`Store`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;

use super::Store;
use crate::model::{
    NewStudent, NewTeacher, Registration, RegistrationId, Student, StudentId, StudentUpdate,
    Teacher, TeacherId,
};
use crate::{EntityKind, Error, Result};

/// Store backed by a `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    ///
    /// Creates the tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS teachers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                is_suspended INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS registrations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                teacher_id INTEGER NOT NULL REFERENCES teachers(id),
                student_id INTEGER NOT NULL REFERENCES students(id),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(teacher_id, student_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Roster lookups go from teacher to students
        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_registrations_student
            ON registrations(student_id)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_teacher(&self, teacher: &NewTeacher) -> sqlx::Result<Teacher> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO teachers (name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(&teacher.name)
        .bind(&teacher.email)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Teacher {
            id: TeacherId::new(result.last_insert_rowid()),
            name: teacher.name.clone(),
            email: teacher.email.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn insert_student(&self, student: &NewStudent) -> sqlx::Result<Student> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO students (name, email, is_suspended, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            ",
        )
        .bind(&student.name)
        .bind(&student.email)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Student {
            id: StudentId::new(result.last_insert_rowid()),
            name: student.name.clone(),
            email: student.email.clone(),
            is_suspended: false,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Store for SqliteStore {
    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM teachers
            WHERE email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_teacher).transpose()
    }

    async fn find_teachers_by_emails(&self, emails: &[String]) -> Result<Vec<Teacher>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, email, created_at, updated_at FROM teachers WHERE email IN (",
        );
        push_list(&mut query, emails.iter().map(String::as_str));
        query.push(")");

        let rows = query.build().fetch_all(&self.pool).await?;
        debug!("Found {} of {} teachers", rows.len(), emails.len());

        rows.iter().map(row_to_teacher).collect()
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM teachers
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_teacher).collect()
    }

    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher> {
        self.insert_teacher(&teacher)
            .await
            .map_err(|e| conflict_or(e, EntityKind::Teacher, &teacher.email))
    }

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_suspended, created_at, updated_at
            FROM students
            WHERE email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_student).transpose()
    }

    async fn find_students_by_emails(&self, emails: &[String]) -> Result<Vec<Student>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, email, is_suspended, created_at, updated_at FROM students WHERE email IN (",
        );
        push_list(&mut query, emails.iter().map(String::as_str));
        query.push(")");

        let rows = query.build().fetch_all(&self.pool).await?;
        debug!("Found {} of {} students", rows.len(), emails.len());

        rows.iter().map(row_to_student).collect()
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, is_suspended, created_at, updated_at
            FROM students
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_student).collect()
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.insert_student(&student)
            .await
            .map_err(|e| conflict_or(e, EntityKind::Student, &student.email))
    }

    async fn update_student(&self, id: StudentId, update: StudentUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE students SET ");
        let mut fields = query.separated(", ");
        if let Some(name) = update.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(is_suspended) = update.is_suspended {
            fields
                .push("is_suspended = ")
                .push_bind_unseparated(i64::from(is_suspended));
        }
        fields
            .push("updated_at = ")
            .push_bind_unseparated(Utc::now().to_rfc3339());
        query.push(" WHERE id = ").push_bind(id.0);

        query.build().execute(&self.pool).await?;
        debug!("Updated student {id}");

        Ok(())
    }

    async fn find_registration(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<Option<Registration>> {
        let row = sqlx::query(
            r"
            SELECT id, teacher_id, student_id, created_at, updated_at
            FROM registrations
            WHERE teacher_id = ? AND student_id = ?
            ",
        )
        .bind(teacher_id.0)
        .bind(student_id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_registration).transpose()
    }

    async fn create_registration(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<Option<Registration>> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO registrations (teacher_id, student_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(teacher_id, student_id) DO NOTHING
            ",
        )
        .bind(teacher_id.0)
        .bind(student_id.0)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Registration {
            id: RegistrationId(result.last_insert_rowid()),
            teacher_id,
            student_id,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_roster_intersection(&self, teacher_ids: &[TeacherId]) -> Result<Vec<Student>> {
        let distinct: HashSet<i64> = teacher_ids.iter().map(|id| id.0).collect();
        if distinct.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            r"
            SELECT s.id, s.name, s.email, s.is_suspended, s.created_at, s.updated_at
            FROM students AS s
            INNER JOIN registrations AS r ON s.id = r.student_id
            WHERE r.teacher_id IN (",
        );
        push_list(&mut query, distinct.iter().copied());
        query.push(
            r")
            GROUP BY s.id
            HAVING COUNT(DISTINCT r.teacher_id) = ",
        );
        query.push_bind(i64::try_from(distinct.len()).unwrap_or(i64::MAX));
        query.push(" ORDER BY s.id ASC");

        let rows = query.build().fetch_all(&self.pool).await?;

        rows.iter().map(row_to_student).collect()
    }

    async fn find_valid_roster(&self, teacher_id: TeacherId) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r"
            SELECT s.id, s.name, s.email, s.is_suspended, s.created_at, s.updated_at
            FROM students AS s
            INNER JOIN registrations AS r ON s.id = r.student_id
            WHERE r.teacher_id = ? AND s.is_suspended = 0
            ORDER BY r.id ASC
            ",
        )
        .bind(teacher_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_student).collect()
    }
}

/// Push `a, b, c` as bound parameters.
fn push_list<'args, T>(
    query: &mut QueryBuilder<'args, Sqlite>,
    values: impl IntoIterator<Item = T>,
) where
    T: 'args + sqlx::Encode<'args, Sqlite> + sqlx::Type<Sqlite>,
{
    let mut separated = query.separated(", ");
    for value in values {
        separated.push_bind(value);
    }
}

/// Map a unique-constraint violation to [`Error::Conflict`].
fn conflict_or(error: sqlx::Error, kind: EntityKind, email: &str) -> Error {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict {
            kind,
            email: email.to_string(),
        },
        _ => Error::Database(error),
    }
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(column);
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))
}

fn row_to_teacher(row: &SqliteRow) -> Result<Teacher> {
    Ok(Teacher {
        id: TeacherId::new(row.get("id")),
        name: row.get("name"),
        email: row.get("email"),
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

fn row_to_student(row: &SqliteRow) -> Result<Student> {
    Ok(Student {
        id: StudentId::new(row.get("id")),
        name: row.get("name"),
        email: row.get("email"),
        is_suspended: row.get::<i64, _>("is_suspended") != 0,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

fn row_to_registration(row: &SqliteRow) -> Result<Registration> {
    Ok(Registration {
        id: RegistrationId(row.get("id")),
        teacher_id: TeacherId::new(row.get("teacher_id")),
        student_id: StudentId::new(row.get("student_id")),
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}
