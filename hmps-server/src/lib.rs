pub mod api;
pub mod bootstrap;
pub mod diagnostics;
pub mod error;
pub mod health;
pub mod logger;
pub mod panic_boundary;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::error::{ApiError, Result as ApiResult};
pub use bootstrap::{ModuleContext, RouteModule, production_modules};
pub use error::{Result as ServerResult, ServerError};
pub use state::{AppState, DbStatus, Phase, ROUTE_PREFIXES, RouteOutcome};

pub use crate::routes::build_router;
