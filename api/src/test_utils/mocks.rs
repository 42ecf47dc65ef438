//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::entities::{
    AdminOverride, ClassificationLabel, ClassificationResult, Comment, CommentId, CommentSort,
    ModerationLabel, NewComment, NewUser, Page, User, UserId,
};
use crate::domain::ports::{CommentRepository, ToxicityClassifier, UserRepository};
use crate::error::{ClassificationUnavailable, DomainError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    pub fn count(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.api_key_hash == hash).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}'",
                new_user.username
            )));
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username.clone(),
            api_key_hash: new_user.api_key_hash.clone(),
            role: new_user.role,
            created_at: Utc::now(),
            last_seen_at: None,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("User {}", id)))?;
        user.last_seen_at = Some(Utc::now());
        Ok(())
    }
}

// ============================================================================
// In-Memory Comment Repository
// ============================================================================

pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
    next_id: AtomicI64,
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self {
            comments: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a comment for testing
    pub fn with_comment(self, comment: Comment) -> Self {
        self.next_id.fetch_max(comment.id.0 + 1, Ordering::SeqCst);
        self.comments.write().unwrap().push(comment);
        self
    }

    pub fn count(&self) -> usize {
        self.comments.read().unwrap().len()
    }

    fn page_of(mut matching: Vec<Comment>, limit: u64, offset: u64) -> Page<Comment> {
        let total = matching.len() as u64;
        let items = matching
            .drain(..)
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Page { items, total }
    }

    fn sort(comments: &mut [Comment], sort: CommentSort) {
        match sort {
            CommentSort::Liked => {
                comments.sort_by(|a, b| b.times_liked.cmp(&a.times_liked).then(a.id.cmp(&b.id)))
            }
            CommentSort::Oldest => {
                comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            }
            CommentSort::Newest => {
                comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
        }
    }

    fn update<F>(&self, id: &CommentId, f: F) -> Result<Comment, DomainError>
    where
        F: FnOnce(&mut Comment),
    {
        let mut comments = self.comments.write().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Comment {}", id)))?;
        f(comment);
        Ok(comment.clone())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, new_comment: &NewComment) -> Result<Comment, DomainError> {
        let decision = &new_comment.decision;
        let comment = Comment {
            id: CommentId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id: new_comment.user_id,
            username: new_comment.username.clone(),
            body: new_comment.body.clone(),
            label: decision.label(),
            confidence: decision.confidence(),
            auto_visible: decision.is_visible(),
            times_liked: 0,
            times_reported: 0,
            admin_override: None,
            created_at: Utc::now(),
        };
        self.comments.write().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let comments = self.comments.read().unwrap();
        Ok(comments.iter().find(|c| c.id == *id).cloned())
    }

    async fn list_visible(
        &self,
        sort: CommentSort,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let mut matching: Vec<Comment> = self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.is_visible())
            .cloned()
            .collect();
        Self::sort(&mut matching, sort);
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn search_visible(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let mut matching: Vec<Comment> = self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.is_visible() && c.body.contains(query))
            .cloned()
            .collect();
        Self::sort(&mut matching, CommentSort::Newest);
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn increment_likes(&self, id: &CommentId) -> Result<(), DomainError> {
        self.update(id, |c| c.times_liked += 1).map(|_| ())
    }

    async fn increment_reports(&self, id: &CommentId) -> Result<(), DomainError> {
        self.update(id, |c| c.times_reported += 1).map(|_| ())
    }

    async fn find_needing_review(
        &self,
        report_threshold: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let mut matching: Vec<Comment> = self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.needs_review(report_threshold))
            .cloned()
            .collect();
        Self::sort(&mut matching, CommentSort::Oldest);
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn list_all(
        &self,
        label: Option<ModerationLabel>,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let mut matching: Vec<Comment> = self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| label.map_or(true, |l| c.effective_label() == l))
            .cloned()
            .collect();
        Self::sort(&mut matching, CommentSort::Newest);
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        let mut all = self.comments.read().unwrap().clone();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn set_override(
        &self,
        id: &CommentId,
        admin_override: &AdminOverride,
    ) -> Result<Comment, DomainError> {
        self.update(id, |c| c.admin_override = Some(admin_override.clone()))
    }
}

// ============================================================================
// Stub Toxicity Classifier
// ============================================================================

/// Classifier double that answers with a fixed result and counts calls
pub struct StubClassifier {
    result: Option<ClassificationResult>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubClassifier {
    pub fn returning(label: ClassificationLabel, confidence: f64) -> Self {
        Self {
            result: Some(ClassificationResult::new(label, confidence)),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the remote service were down
    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToxicityClassifier for StubClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());

        self.result.ok_or_else(|| ClassificationUnavailable::Status {
            status: 503,
            message: "stub classifier down".to_string(),
        })
    }
}
