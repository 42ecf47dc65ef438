//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod classifier;
pub mod repositories;

pub use classifier::ToxicityClassifier;
pub use repositories::{CommentRepository, UserRepository};
