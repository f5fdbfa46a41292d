use crate::{ConfigError, ConfigErrorResult, DEFAULT_JWT_EXPIRE_SECS, MIN_JWT_EXPIRE_SECS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Absent = auth module cannot be mounted.
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds
    pub jwt_expire_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expire_secs: DEFAULT_JWT_EXPIRE_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref secret) = self.jwt_secret
            && secret.is_empty()
        {
            return Err(ConfigError::auth("auth.jwt_secret cannot be empty"));
        }

        if self.jwt_expire_secs < MIN_JWT_EXPIRE_SECS {
            return Err(ConfigError::auth(format!(
                "auth.jwt_expire_secs must be >= {}, got {}",
                MIN_JWT_EXPIRE_SECS, self.jwt_expire_secs
            )));
        }

        Ok(())
    }
}
