//! Phase-observability endpoints: root liveness, `/api/status`, `/api/test`.
//!
//! These are installed before the connection attempt resolves and must
//! answer in every phase. None of them can fail while composing a
//! response.

use crate::state::{AppState, Phase};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

/// GET / - static service metadata. The liveness probe: never depends on
/// connector outcome.
pub async fn root() -> Response {
    let body = json!({
        "message": "HMPS API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
        "docs": "/api/docs",
        "diagnostics": "/api/diagnostics",
    });

    (StatusCode::OK, Json(body)).into_response()
}

/// GET /api/status - phase report
pub async fn status(State(state): State<AppState>) -> Response {
    let db_status = state.db_status().await;
    let timestamp = Utc::now().to_rfc3339();

    match db_status.phase {
        Phase::Ready => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "environment": state.environment,
                "timestamp": timestamp,
                "message": "HMPS API Server running",
                "phase": db_status.phase,
                "dbConnected": true,
            })),
        )
            .into_response(),
        Phase::Starting => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "environment": state.environment,
                "timestamp": timestamp,
                "message": "HMPS API Server starting, database connection pending",
                "phase": db_status.phase,
                "dbConnected": false,
            })),
        )
            .into_response(),
        Phase::Degraded => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "environment": state.environment,
                "timestamp": timestamp,
                "message": "HMPS API Server running with database connection issues",
                "phase": db_status.phase,
                "error": db_status.last_error.unwrap_or_default(),
            })),
        )
            .into_response(),
    }
}

/// GET /api/test - connectivity self-check
pub async fn test(State(state): State<AppState>) -> Response {
    let db_status = state.db_status().await;

    if db_status.db_connected {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "HMPS API is working correctly",
                "dbConnected": true,
            })),
        )
            .into_response()
    } else {
        let error = db_status
            .last_error
            .unwrap_or_else(|| "database connection pending".to_string());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": "HMPS API is experiencing database connection issues",
                "error": error,
            })),
        )
            .into_response()
    }
}
