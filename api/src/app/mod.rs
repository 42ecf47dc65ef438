//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod board_service;
pub mod csv_export;
pub mod moderation_service;
pub mod user_service;

pub use board_service::BoardService;
pub use moderation_service::ModerationService;
pub use user_service::{hash_api_key, UserService};
