//! Terminal error boundary.
//!
//! Installed as the outermost request layer. A panic anywhere downstream
//! becomes exactly one structured 500 response; the process keeps serving.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use serde_json::json;

pub async fn panic_boundary(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let message = panic_message(panic);
            log::error!("Server Error: {} ({} {})", message, method, path);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Server Error",
                    "message": message,
                    "path": path,
                    "method": method,
                })),
            )
                .into_response()
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
