pub mod connector;
pub mod error;
pub mod models;
pub mod repositories;

pub use connector::{Connector, SqliteConnector, run_migrations};
pub use error::{DbError, Result};
pub use models::student::Student;
pub use models::user::User;
pub use repositories::student_repository::StudentRepository;
pub use repositories::user_repository::UserRepository;
