//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    AdminOverride, Comment, CommentId, CommentSort, ModerationLabel, NewComment, NewUser, Page,
    User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Update the last seen timestamp
    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError>;
}

/// Repository for Comment entities
///
/// "Visible" always means effective visibility: the admin override when one
/// exists, the automated decision otherwise. Same for label filters.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Store a moderated comment with zeroed counters
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError>;

    /// Find a comment by ID regardless of visibility
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// Page through visible comments
    async fn list_visible(
        &self,
        sort: CommentSort,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError>;

    /// Visible comments whose body contains `query` (newest first)
    async fn search_visible(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError>;

    /// Atomically add one like. `NotFound` if the comment does not exist.
    async fn increment_likes(&self, id: &CommentId) -> Result<(), DomainError>;

    /// Atomically add one report. `NotFound` if the comment does not exist.
    async fn increment_reports(&self, id: &CommentId) -> Result<(), DomainError>;

    /// Unreviewed comments that are hidden or reported at least `report_threshold` times
    /// (oldest first)
    async fn find_needing_review(
        &self,
        report_threshold: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError>;

    /// All comments (newest first), optionally filtered by effective label
    async fn list_all(
        &self,
        label: Option<ModerationLabel>,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError>;

    /// Every comment in id order, for export
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError>;

    /// Record an admin override. `NotFound` if the comment does not exist.
    async fn set_override(
        &self,
        id: &CommentId,
        admin_override: &AdminOverride,
    ) -> Result<Comment, DomainError>;
}
