use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] hmps_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] hmps_db::DbError),

    #[error("auth routes require auth.jwt_secret to be configured")]
    MissingJwtSecret,

    #[error("Route module error: {message}")]
    Module { message: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
