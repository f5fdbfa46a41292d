use crate::state::{AppState, RouteOutcome, RouteSlot};
use crate::{diagnostics, health, panic_boundary};

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower::ServiceExt;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Build the application router with all endpoints.
///
/// The phase-independent endpoints answer from the moment the listener is
/// bound; each data prefix resolves through its route slot, so mounting
/// happens by slot writes rather than router mutation.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(health::root))
        .route("/api/status", get(health::status))
        .route("/api/test", get(health::test))
        .route("/api/diagnostics", get(diagnostics::diagnostics))
        .route("/api/debug", get(diagnostics::debug))
        .with_state(state.clone());

    // Data route prefixes, each behind its own slot
    for (&prefix, slot) in state.slots.iter() {
        router = router.nest_service(prefix, slot_router(prefix, slot.clone()));
    }

    router
        // Terminal error boundary (innermost of the two layers)
        .layer(axum::middleware::from_fn(panic_boundary::panic_boundary))
        // CORS applies to every response, stubs and errors included
        .layer(cors_layer())
}

/// CORS policy from the original deployment: any origin, the four declared
/// methods, credentials allowed. Credentials rule out wildcard headers, so
/// origin and headers mirror the request.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[derive(Clone)]
struct SlotState {
    prefix: &'static str,
    slot: RouteSlot,
}

fn slot_router(prefix: &'static str, slot: RouteSlot) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(SlotState { prefix, slot })
}

/// Resolve a data-route request against the current slot outcome.
async fn dispatch(State(state): State<SlotState>, request: Request) -> Response {
    let outcome = state.slot.read().await;

    match &*outcome {
        RouteOutcome::Mounted(router) => {
            let router = router.clone();
            drop(outcome);

            match router.oneshot(request).await {
                Ok(response) => response,
                Err(infallible) => match infallible {},
            }
        }
        RouteOutcome::Pending => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "Server Starting",
                "message": "The API is still establishing its database connection",
            })),
        )
            .into_response(),
        RouteOutcome::LoadFailed(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "Route Error",
                "details": format!("{} routes failed to load", state.prefix),
                "message": message,
            })),
        )
            .into_response(),
        RouteOutcome::DbUnavailable(message) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "Database Unavailable",
                "message": "The API is unable to connect to the database",
                "details": message,
            })),
        )
            .into_response(),
    }
}
