//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - The classifier double needs to count calls and replay a fixed answer
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! Note: AppState holds concrete Postgres repositories, so handlers are not
//! driven end to end here. Service-level tests cover the board's behavior.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
