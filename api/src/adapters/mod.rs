//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod blacklist;
pub mod classifier;
pub mod postgres;

pub use blacklist::load_blacklist;
pub use classifier::HttpToxicityClassifier;
pub use postgres::{PostgresCommentRepository, PostgresUserRepository};
