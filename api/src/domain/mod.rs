//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `blacklist`: The static token veto applied before classification
//! - `ports`: Trait definitions for external dependencies

pub mod blacklist;
pub mod entities;
pub mod ports;
