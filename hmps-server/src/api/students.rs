//! Student route module (`/api/students`).

use crate::bootstrap::ModuleContext;
use crate::error::Result as ServerErrorResult;

use hmps_db::{Student, StudentRepository};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::error::{ApiError, Result as ApiResult};

#[derive(Clone)]
struct StudentsState {
    pool: SqlitePool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub class_name: Option<String>,
    pub created_at: String,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name,
            email: student.email,
            class_name: student.class_name,
            created_at: student.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: Option<String>,
    pub class_name: Option<String>,
}

pub fn load(ctx: &ModuleContext) -> ServerErrorResult<Router> {
    let state = StudentsState {
        pool: ctx.pool.clone(),
    };

    Ok(Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/{id}", get(get_student))
        .with_state(state))
}

async fn list_students(State(state): State<StudentsState>) -> ApiResult<Json<Value>> {
    let repo = StudentRepository::new(state.pool.clone());
    let students: Vec<StudentDto> = repo
        .list()
        .await?
        .into_iter()
        .map(StudentDto::from)
        .collect();

    Ok(Json(json!({ "success": true, "students": students })))
}

async fn get_student(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = Uuid::parse_str(&id)?;

    let repo = StudentRepository::new(state.pool.clone());
    let student = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student {} not found", id)))?;

    Ok(Json(
        json!({ "success": true, "student": StudentDto::from(student) }),
    ))
}

async fn create_student(
    State(state): State<StudentsState>,
    Json(request): Json<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if request.name.is_empty() {
        return Err(ApiError::validation("name is required"));
    }

    let mut student = Student::new(request.name);
    student.email = request.email;
    student.class_name = request.class_name;

    let repo = StudentRepository::new(state.pool.clone());
    repo.create(&student).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "student": StudentDto::from(student) })),
    ))
}
