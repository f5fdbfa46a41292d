//! In-process server state shared between the bootstrap sequencer and the
//! request handlers.
//!
//! The status cell and the per-prefix route slots are written exactly once,
//! by the bootstrap task, after the single database connection attempt
//! resolves. Handlers only ever read them.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use hmps_config::EnvPresence;
use serde::Serialize;
use tokio::sync::RwLock;

/// Prefixes the bootstrap sequencer manages. Each gets its own slot so a
/// failure in one route module never affects the others.
pub const ROUTE_PREFIXES: [&str; 4] = ["/api/auth", "/api/users", "/api/students", "/api/export"];

/// Server-wide database availability phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Starting,
    Ready,
    Degraded,
}

/// Snapshot of the resilience state. Transitions once, never back.
#[derive(Debug, Clone)]
pub struct DbStatus {
    pub phase: Phase,
    pub db_connected: bool,
    pub last_error: Option<String>,
}

impl DbStatus {
    pub fn starting() -> Self {
        Self {
            phase: Phase::Starting,
            db_connected: false,
            last_error: None,
        }
    }

    pub fn ready() -> Self {
        Self {
            phase: Phase::Ready,
            db_connected: true,
            last_error: None,
        }
    }

    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            phase: Phase::Degraded,
            db_connected: false,
            last_error: Some(error.into()),
        }
    }
}

/// What a route prefix currently resolves to.
#[derive(Debug)]
pub enum RouteOutcome {
    /// Connection attempt still outstanding
    Pending,
    /// Module loaded; requests are forwarded into this router
    Mounted(Router),
    /// Module loader failed; the message is the loader's error
    LoadFailed(String),
    /// Connection attempt failed; the message is the connector's error
    DbUnavailable(String),
}

pub type StatusCell = Arc<RwLock<DbStatus>>;
pub type RouteSlot = Arc<RwLock<RouteOutcome>>;

/// Shared application state handed to `build_router`.
#[derive(Clone)]
pub struct AppState {
    pub status: StatusCell,
    pub slots: Arc<BTreeMap<&'static str, RouteSlot>>,
    pub environment: String,
    pub env_presence: EnvPresence,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(environment: impl Into<String>, env_presence: EnvPresence) -> Self {
        let slots = ROUTE_PREFIXES
            .iter()
            .map(|prefix| (*prefix, Arc::new(RwLock::new(RouteOutcome::Pending))))
            .collect();

        Self {
            status: Arc::new(RwLock::new(DbStatus::starting())),
            slots: Arc::new(slots),
            environment: environment.into(),
            env_presence,
            started_at: Utc::now(),
        }
    }

    pub async fn db_status(&self) -> DbStatus {
        self.status.read().await.clone()
    }

    pub async fn set_db_status(&self, status: DbStatus) {
        *self.status.write().await = status;
    }

    /// Slot for a managed prefix, if any.
    pub fn slot(&self, prefix: &str) -> Option<RouteSlot> {
        self.slots.get(prefix).cloned()
    }
}
