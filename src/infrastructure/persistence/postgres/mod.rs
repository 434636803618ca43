pub mod session_repository;
pub mod user_repository;

pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;
