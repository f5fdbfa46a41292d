#![allow(dead_code)]

//! Test infrastructure for hmps-server API tests

use hmps_config::{AuthConfig, EnvPresence};
use hmps_db::{Connector, DbError, Result as DbResult};
use hmps_server::state::AppState;
use hmps_server::{ModuleContext, RouteModule, bootstrap};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::{Router, routing::get};
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Create a test pool with in-memory SQLite and migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    hmps_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Connector stub that hands out a pre-built pool
pub struct StubConnector {
    pool: SqlitePool,
}

impl StubConnector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Connector for StubConnector {
    async fn connect(&self) -> DbResult<SqlitePool> {
        Ok(self.pool.clone())
    }
}

/// Connector stub that always fails with the given message
pub struct FailingConnector {
    message: String,
}

impl FailingConnector {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Connector for FailingConnector {
    async fn connect(&self) -> DbResult<SqlitePool> {
        Err(DbError::Initialization {
            message: self.message.clone(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Some("test-secret".to_string()),
        jwt_expire_secs: 3600,
    }
}

pub fn test_state() -> AppState {
    AppState::new("test", EnvPresence::detect())
}

/// State + pool after a successful bootstrap with the production modules
pub async fn ready_state() -> (AppState, SqlitePool) {
    let state = test_state();
    let pool = create_test_pool().await;

    bootstrap::run(
        state.clone(),
        Arc::new(StubConnector::new(pool.clone())),
        test_auth_config(),
        hmps_server::production_modules(),
    )
    .await;

    (state, pool)
}

/// State after a failed bootstrap
pub async fn degraded_state(error_message: &str) -> AppState {
    let state = test_state();

    bootstrap::run(
        state.clone(),
        Arc::new(FailingConnector::new(error_message)),
        test_auth_config(),
        hmps_server::production_modules(),
    )
    .await;

    state
}

/// Loader that always fails; used to simulate a broken route module
pub fn failing_loader(_ctx: &ModuleContext) -> hmps_server::ServerResult<Router> {
    Err(hmps_server::ServerError::Module {
        message: "export module exploded".to_string(),
    })
}

/// Loader whose handler panics; used to exercise the panic boundary
pub fn panicking_loader(_ctx: &ModuleContext) -> hmps_server::ServerResult<Router> {
    async fn boom() {
        panic!("boom handler panicked");
    }
    Ok(Router::new().route("/boom", get(boom)))
}

/// Production modules with the export loader replaced by a failing one
pub fn modules_with_broken_export() -> Vec<RouteModule> {
    let mut modules = hmps_server::production_modules();
    for module in &mut modules {
        if module.prefix == "/api/export" {
            module.loader = failing_loader;
        }
    }
    modules
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<axum::body::Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
