//! Export route module (`/api/export`).
//!
//! Renders the student roster as JSON or CSV.

use crate::bootstrap::ModuleContext;
use crate::error::Result as ServerErrorResult;

use hmps_db::{Student, StudentRepository};

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use super::error::Result as ApiResult;
use super::students::StudentDto;

#[derive(Clone)]
struct ExportState {
    pool: SqlitePool,
}

pub fn load(ctx: &ModuleContext) -> ServerErrorResult<Router> {
    let state = ExportState {
        pool: ctx.pool.clone(),
    };

    Ok(Router::new()
        .route("/students", get(export_students_json))
        .route("/students.csv", get(export_students_csv))
        .with_state(state))
}

async fn export_students_json(State(state): State<ExportState>) -> ApiResult<Json<Value>> {
    let repo = StudentRepository::new(state.pool.clone());
    let students: Vec<StudentDto> = repo
        .list()
        .await?
        .into_iter()
        .map(StudentDto::from)
        .collect();

    Ok(Json(json!({
        "success": true,
        "count": students.len(),
        "students": students,
    })))
}

async fn export_students_csv(State(state): State<ExportState>) -> ApiResult<Response> {
    let repo = StudentRepository::new(state.pool.clone());
    let students = repo.list().await?;

    let csv = render_csv(&students);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"students.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

pub(crate) fn render_csv(students: &[Student]) -> String {
    let mut out = String::from("id,name,email,class_name,created_at\n");

    for student in students {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            student.id,
            escape_csv_field(&student.name),
            escape_csv_field(student.email.as_deref().unwrap_or("")),
            escape_csv_field(student.class_name.as_deref().unwrap_or("")),
            student.created_at.to_rfc3339(),
        ));
    }

    out
}

/// Quote a field when it contains a delimiter, quote, or line break (RFC 4180).
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
