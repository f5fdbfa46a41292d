//! Diagnostic endpoints for deployment troubleshooting.
//!
//! `/api/diagnostics` reports environment presence flags (never values);
//! `/api/debug` additionally walks the project file tree. Both are
//! read-only introspection and should be access-restricted at the edge in
//! production deployments.

use crate::state::AppState;

use std::path::Path;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

/// Directories skipped by the file walker. Build output and VCS internals
/// drown out the listing that matters for path debugging.
const SKIP_DIRS: [&str; 3] = ["target", ".git", "node_modules"];

#[derive(Debug, Default, Serialize)]
pub struct FileListing {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub errors: Vec<ListingError>,
}

#[derive(Debug, Serialize)]
pub struct ListingError {
    pub path: String,
    pub error: String,
}

/// GET /api/diagnostics - environment report, no database required
pub async fn diagnostics(State(state): State<AppState>) -> Response {
    match serde_json::to_value(state.env_presence) {
        Ok(env) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "environment": state.environment,
                "timestamp": Utc::now().to_rfc3339(),
                "serverVersion": env!("CARGO_PKG_VERSION"),
                "startedAt": state.started_at.to_rfc3339(),
                "env": env,
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "Diagnostics Error",
                "message": e.to_string(),
            })),
        )
            .into_response(),
    }
}

/// GET /api/debug - process and file-system introspection
pub async fn debug(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("<unavailable: {}>", e));

    let mut listing = FileListing::default();
    if let Ok(root) = std::env::current_dir() {
        list_project_files(&root, Path::new(""), &mut listing);
    }

    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let body = json!({
        "success": true,
        "environment": state.environment,
        "timestamp": Utc::now().to_rfc3339(),
        "process": {
            "version": env!("CARGO_PKG_VERSION"),
            "platform": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "cwd": cwd,
        },
        "request": {
            "path": uri.path(),
            "host": host,
        },
        "env": state.env_presence,
        "projectStructure": listing,
    });

    (StatusCode::OK, Json(body)).into_response()
}

/// Recursively list directories and files under `dir`.
///
/// Errors on individual entries are captured inline; the walk never fails
/// as a whole.
pub fn list_project_files(dir: &Path, relative: &Path, out: &mut FileListing) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            out.errors.push(ListingError {
                path: relative.display().to_string(),
                error: e.to_string(),
            });
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                out.errors.push(ListingError {
                    path: relative.display().to_string(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let name = entry.file_name();
        let current_relative = relative.join(&name);

        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                if SKIP_DIRS.iter().any(|skip| name == *skip) {
                    continue;
                }

                out.directories.push(current_relative.display().to_string());
                list_project_files(&entry.path(), &current_relative, out);
            }
            Ok(_) => {
                out.files.push(current_relative.display().to_string());
            }
            Err(e) => {
                out.errors.push(ListingError {
                    path: current_relative.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }
}
