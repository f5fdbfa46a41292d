pub mod auth;
pub mod error;
pub mod export;
pub mod students;
pub mod users;
