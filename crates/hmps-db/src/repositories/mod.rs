pub mod student_repository;
pub mod user_repository;
