//! User route module (`/api/users`).

use crate::bootstrap::ModuleContext;
use crate::error::Result as ServerErrorResult;

use hmps_db::{User, UserRepository};

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
struct UsersState {
    pool: SqlitePool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

pub fn load(ctx: &ModuleContext) -> ServerErrorResult<Router> {
    let state = UsersState {
        pool: ctx.pool.clone(),
    };

    Ok(Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user))
        .with_state(state))
}

async fn list_users(State(state): State<UsersState>) -> ApiResult<Json<Value>> {
    let repo = UserRepository::new(state.pool.clone());
    let users: Vec<UserDto> = repo.list().await?.into_iter().map(UserDto::from).collect();

    Ok(Json(json!({ "success": true, "users": users })))
}

async fn get_user(
    State(state): State<UsersState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = Uuid::parse_str(&id)?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(json!({ "success": true, "user": UserDto::from(user) })))
}

async fn create_user(
    State(state): State<UsersState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if request.email.is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if request.name.is_empty() {
        return Err(ApiError::validation("name is required"));
    }

    let user = User::new(request.email, request.name);

    let repo = UserRepository::new(state.pool.clone());
    repo.create(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": UserDto::from(user) })),
    ))
}
