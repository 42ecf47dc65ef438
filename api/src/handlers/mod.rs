//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod admin;
pub mod comments;
pub mod users;

pub use admin::{export_csv, list_all_comments, override_comment, review_queue};
pub use comments::{
    get_comment, like_comment, list_comments, report_comment, search_comments, submit_comment,
};
pub use users::{me, register};
