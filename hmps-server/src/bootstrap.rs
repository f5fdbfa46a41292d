//! Startup resilience sequencer.
//!
//! Invokes the database connector exactly once and settles the server into
//! one of its terminal phases:
//!
//! ```text
//! STARTING --(connect succeeds)--> READY
//! STARTING --(connect fails)-----> DEGRADED
//! ```
//!
//! On success each route module is loaded inside its own error boundary; a
//! loader failure replaces only that prefix with a stub (the DB phase stays
//! READY). On failure every prefix gets a database-unavailable stub. There
//! is no retry; an operator restarts the process to re-attempt.
//!
//! The caller spawns [`run`] as a background task, so already-installed
//! endpoints (root, status, diagnostics) answer while the attempt is
//! outstanding.

use crate::api;
use crate::error::Result as ServerErrorResult;
use crate::state::{AppState, DbStatus, RouteOutcome};

use std::sync::Arc;

use axum::Router;
use hmps_config::AuthConfig;
use hmps_db::Connector;
use log::{error, info, warn};
use sqlx::SqlitePool;

/// Everything a route-module loader may need.
#[derive(Clone)]
pub struct ModuleContext {
    pub pool: SqlitePool,
    pub jwt_secret: Option<String>,
    pub jwt_expire_secs: u64,
}

/// A (prefix, loader) pair. Loaders are plain functions so a failing one
/// can be substituted in tests.
pub struct RouteModule {
    pub prefix: &'static str,
    pub loader: fn(&ModuleContext) -> ServerErrorResult<Router>,
}

/// The production route-module list, in mount order.
pub fn production_modules() -> Vec<RouteModule> {
    vec![
        RouteModule {
            prefix: "/api/auth",
            loader: api::auth::load,
        },
        RouteModule {
            prefix: "/api/users",
            loader: api::users::load,
        },
        RouteModule {
            prefix: "/api/students",
            loader: api::students::load,
        },
        RouteModule {
            prefix: "/api/export",
            loader: api::export::load,
        },
    ]
}

/// Run the single connection attempt and settle the route slots.
pub async fn run(
    state: AppState,
    connector: Arc<dyn Connector>,
    auth: AuthConfig,
    modules: Vec<RouteModule>,
) {
    info!("Attempting database connection...");

    match connector.connect().await {
        Ok(pool) => {
            info!("Database connection established");
            state.set_db_status(DbStatus::ready()).await;

            let ctx = ModuleContext {
                pool,
                jwt_secret: auth.jwt_secret,
                jwt_expire_secs: auth.jwt_expire_secs,
            };

            for module in modules {
                let Some(slot) = state.slot(module.prefix) else {
                    warn!("No route slot for prefix {}, skipping", module.prefix);
                    continue;
                };

                // Isolated error boundary per module: one failing loader
                // must not affect the others or the DB phase.
                match (module.loader)(&ctx) {
                    Ok(router) => {
                        *slot.write().await = RouteOutcome::Mounted(router);
                        info!("Routes mounted: {}", module.prefix);
                    }
                    Err(e) => {
                        error!("Error loading routes for {}: {}", module.prefix, e);
                        *slot.write().await = RouteOutcome::LoadFailed(e.to_string());
                    }
                }
            }
        }
        Err(e) => {
            let message = e.to_string();
            error!("Database connection error: {}", message);
            state.set_db_status(DbStatus::degraded(&message)).await;

            // Stub out every data route instead of loading any module
            for slot in state.slots.values() {
                *slot.write().await = RouteOutcome::DbUnavailable(message.clone());
            }
        }
    }
}
