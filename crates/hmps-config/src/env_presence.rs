use serde::Serialize;

/// Presence-only flags for sensitive environment variables.
///
/// The diagnostics endpoint reports whether these are set so operators can
/// spot a missing deployment variable. Values are never captured.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnvPresence {
    pub database_path_exists: bool,
    pub jwt_secret_exists: bool,
    pub jwt_expire_exists: bool,
}

impl EnvPresence {
    pub fn detect() -> Self {
        Self {
            database_path_exists: std::env::var("HMPS_DATABASE_PATH").is_ok(),
            jwt_secret_exists: std::env::var("HMPS_JWT_SECRET").is_ok(),
            jwt_expire_exists: std::env::var("HMPS_JWT_EXPIRE_SECS").is_ok(),
        }
    }
}
