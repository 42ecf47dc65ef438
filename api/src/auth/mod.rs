//! Authentication
//!
//! Users authenticate with `Authorization: Bearer <api_key>`.

mod api_key;

pub use api_key::{auth_middleware, require_admin};
