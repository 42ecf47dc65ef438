//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod comment;
pub mod moderation;
pub mod user;

pub use comment::{AdminOverride, Comment, CommentId, CommentSort, NewComment, Page};
pub use moderation::{
    ClassificationLabel, ClassificationResult, ModerationDecision, ModerationLabel,
};
pub use user::{NewUser, User, UserId, UserRole};
