//! Authentication route module (`/api/auth`).
//!
//! Thin by design: a login handler that issues an HS256 token for a known
//! user. The loader fails when no signing secret is configured, which
//! leaves this prefix stubbed without touching the other modules.

use crate::bootstrap::ModuleContext;
use crate::error::{Result as ServerErrorResult, ServerError};

use hmps_db::UserRepository;

use axum::{Json, Router, extract::State, routing::post};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use super::error::{ApiError, Result as ApiResult};

#[derive(Clone)]
struct AuthState {
    pool: SqlitePool,
    secret: String,
    expire_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

pub fn load(ctx: &ModuleContext) -> ServerErrorResult<Router> {
    let secret = ctx
        .jwt_secret
        .clone()
        .ok_or(ServerError::MissingJwtSecret)?;

    let state = AuthState {
        pool: ctx.pool.clone(),
        secret,
        expire_secs: ctx.jwt_expire_secs,
    };

    Ok(Router::new()
        .route("/login", post(login))
        .with_state(state))
}

async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    if request.email.is_empty() {
        return Err(ApiError::validation("email is required"));
    }

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat: now,
        exp: now + state.expire_secs as i64,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": {
            "id": user.id.to_string(),
            "email": user.email,
            "name": user.name,
        },
    })))
}
