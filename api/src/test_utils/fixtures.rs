//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    ClassificationLabel, ClassificationResult, Comment, CommentId, ModerationDecision, User,
    UserId, UserRole,
};

/// Create a test member with default values
pub fn test_user() -> User {
    User {
        id: UserId(Uuid::new_v4()),
        username: format!("ayse-yilmaz-{}", Uuid::new_v4()),
        api_key_hash: format!("hash-{}", Uuid::new_v4()),
        role: UserRole::Member,
        created_at: Utc::now(),
        last_seen_at: None,
    }
}

/// Create a test admin
pub fn test_admin() -> User {
    User {
        role: UserRole::Admin,
        ..test_user()
    }
}

/// A classifier-approved decision
pub fn non_toxic(confidence: f64) -> ModerationDecision {
    ModerationDecision::from_classification(ClassificationResult::new(
        ClassificationLabel::NonToxic,
        confidence,
    ))
}

/// A classifier-rejected decision
pub fn toxic(confidence: f64) -> ModerationDecision {
    ModerationDecision::from_classification(ClassificationResult::new(
        ClassificationLabel::Toxic,
        confidence,
    ))
}

/// Create a stored comment with the given decision.
/// Higher ids are posted later.
pub fn test_comment(id: i64, body: &str, decision: ModerationDecision) -> Comment {
    let author = test_user();
    Comment {
        id: CommentId(id),
        user_id: author.id,
        username: author.username,
        body: body.to_string(),
        label: decision.label(),
        confidence: decision.confidence(),
        auto_visible: decision.is_visible(),
        times_liked: 0,
        times_reported: 0,
        admin_override: None,
        created_at: Utc::now() - Duration::hours(24) + Duration::minutes(id),
    }
}

/// Visible comment with a like count
pub fn test_comment_liked(id: i64, body: &str, times_liked: i32) -> Comment {
    Comment {
        times_liked,
        ..test_comment(id, body, non_toxic(0.9))
    }
}
