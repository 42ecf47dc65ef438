//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod comment_repo;
pub mod user_repo;


pub use comment_repo::PostgresCommentRepository;
pub use user_repo::PostgresUserRepository;
