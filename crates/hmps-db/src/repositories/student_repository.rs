use crate::{DbError, Result as DbErrorResult, Student};

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, student: &Student) -> DbErrorResult<()> {
        let id = student.id.to_string();
        let created_at = student.created_at.timestamp();

        sqlx::query(
            "INSERT INTO students (id, name, email, class_name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.class_name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list(&self) -> DbErrorResult<Vec<Student>> {
        let rows = sqlx::query(
            "SELECT id, name, email, class_name, created_at FROM students ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_student).collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Student>> {
        let id_str = id.to_string();

        let row = sqlx::query(
            "SELECT id, name, email, class_name, created_at FROM students WHERE id = ?",
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_student).transpose()
    }
}

fn map_student(row: &SqliteRow) -> DbErrorResult<Student> {
    let id: String = row.get("id");
    let created_at: i64 = row.get("created_at");

    Ok(Student {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in students.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        name: row.get("name"),
        email: row.get("email"),
        class_name: row.get("class_name"),
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in students.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
