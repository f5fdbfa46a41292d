mod config;

use std::env;

use tempfile::TempDir;

/// Scoped environment override. The previous value comes back when the
/// guard drops, so `#[serial]` tests cannot leak state into each other.
pub(crate) struct ScopedEnv {
    key: &'static str,
    saved: Option<String>,
}

impl ScopedEnv {
    fn swap(key: &'static str, value: Option<&str>) -> Self {
        let saved = env::var(key).ok();
        unsafe {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        Self { key, saved }
    }

    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        Self::swap(key, Some(value))
    }

    pub(crate) fn unset(key: &'static str) -> Self {
        Self::swap(key, None)
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        unsafe {
            match self.saved.take() {
                Some(v) => env::set_var(self.key, v),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Fresh temp directory wired up as the config directory.
pub(crate) fn scratch_config_dir() -> (TempDir, ScopedEnv) {
    let dir = TempDir::new().unwrap();
    let guard = ScopedEnv::set("HMPS_CONFIG_DIR", dir.path().to_str().unwrap());
    (dir, guard)
}
