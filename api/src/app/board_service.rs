//! Board service
//!
//! Public comment board plus the admin review workflow. Every new comment
//! goes through moderation exactly once before it is stored.

use std::sync::Arc;

use chrono::Utc;

use crate::app::csv_export::comments_to_csv;
use crate::app::moderation_service::ModerationService;
use crate::domain::entities::{
    AdminOverride, Comment, CommentId, CommentSort, ModerationLabel, NewComment, Page, User,
};
use crate::domain::ports::{CommentRepository, ToxicityClassifier};
use crate::error::{AppError, DomainError};

pub const MAX_COMMENT_CHARS: usize = 2000;
pub const DEFAULT_PER_PAGE: u64 = 3;
pub const MAX_PER_PAGE: u64 = 50;
pub const DEFAULT_ADMIN_LIMIT: u64 = 50;
pub const MAX_ADMIN_LIMIT: u64 = 200;
/// Offsets are bound as BIGINT
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// 1-based page number and page size turned into (limit, offset)
pub fn page_window(page: Option<u64>, per_page: Option<u64>) -> Result<(u64, u64), AppError> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

    if page == 0 {
        return Err(AppError::BadRequest("page starts at 1".to_string()));
    }
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(AppError::BadRequest(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    let offset = (page - 1)
        .checked_mul(per_page)
        .filter(|offset| *offset <= MAX_OFFSET)
        .ok_or_else(|| AppError::BadRequest("page is out of range".to_string()))?;
    Ok((per_page, offset))
}

/// Admin listings clamp instead of rejecting
pub fn admin_window(limit: Option<u64>, offset: Option<u64>) -> (u64, u64) {
    (
        limit.unwrap_or(DEFAULT_ADMIN_LIMIT).clamp(1, MAX_ADMIN_LIMIT),
        offset.unwrap_or(0).min(MAX_OFFSET),
    )
}

pub struct BoardService<CR, C>
where
    CR: CommentRepository,
    C: ToxicityClassifier,
{
    comments: Arc<CR>,
    moderation: ModerationService<C>,
    report_threshold: i32,
}

impl<CR, C> BoardService<CR, C>
where
    CR: CommentRepository,
    C: ToxicityClassifier,
{
    pub fn new(comments: Arc<CR>, moderation: ModerationService<C>, report_threshold: i32) -> Self {
        Self {
            comments,
            moderation,
            report_threshold,
        }
    }

    /// Moderate and store a comment
    ///
    /// When the classifier is unavailable nothing is stored and the error is
    /// returned so the author can retry.
    pub async fn submit_comment(&self, author: &User, text: &str) -> Result<Comment, AppError> {
        let body = text.trim();
        if body.is_empty() {
            return Err(AppError::BadRequest("Comment cannot be empty".to_string()));
        }
        if body.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::BadRequest(format!(
                "Comment must be at most {} characters",
                MAX_COMMENT_CHARS
            )));
        }

        let decision = self.moderation.moderate(body).await?;

        let comment = self
            .comments
            .create(&NewComment {
                user_id: author.id,
                username: author.username.clone(),
                body: body.to_string(),
                decision,
            })
            .await?;

        tracing::debug!(
            comment_id = %comment.id,
            user_id = %author.id,
            visible = comment.is_visible(),
            "Comment stored"
        );
        Ok(comment)
    }

    pub async fn list_visible(
        &self,
        sort: CommentSort,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<Page<Comment>, AppError> {
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self.comments.list_visible(sort, limit, offset).await?)
    }

    /// A visible comment. Hidden and unknown ids look the same.
    pub async fn get_visible(&self, id: &CommentId) -> Result<Comment, AppError> {
        match self.comments.find_by_id(id).await? {
            Some(comment) if comment.is_visible() => Ok(comment),
            _ => Err(AppError::NotFound(format!("Comment {}", id))),
        }
    }

    pub async fn like(&self, id: &CommentId) -> Result<Comment, AppError> {
        self.get_visible(id).await?;
        self.comments.increment_likes(id).await?;
        self.reload(id).await
    }

    pub async fn report(&self, id: &CommentId) -> Result<Comment, AppError> {
        self.get_visible(id).await?;
        self.comments.increment_reports(id).await?;
        let comment = self.reload(id).await?;

        if comment.times_reported == self.report_threshold && !comment.is_reviewed() {
            tracing::info!(
                comment_id = %comment.id,
                reports = comment.times_reported,
                "Comment entered review queue"
            );
        }
        Ok(comment)
    }

    /// Case-sensitive substring search over visible comments, newest first
    pub async fn search(
        &self,
        query: &str,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<Page<Comment>, AppError> {
        if query.is_empty() {
            return Err(AppError::BadRequest("Search query cannot be empty".to_string()));
        }
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self.comments.search_visible(query, limit, offset).await?)
    }

    /// Unreviewed comments that are hidden or reported enough, oldest first
    pub async fn review_queue(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<Comment>, AppError> {
        let (limit, offset) = admin_window(limit, offset);
        Ok(self
            .comments
            .find_needing_review(self.report_threshold, limit, offset)
            .await?)
    }

    pub async fn list_all(
        &self,
        label: Option<ModerationLabel>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page<Comment>, AppError> {
        let (limit, offset) = admin_window(limit, offset);
        Ok(self.comments.list_all(label, limit, offset).await?)
    }

    /// Replace the automated label and visibility. The automated decision is kept.
    ///
    /// `visible` defaults to the label's natural visibility.
    pub async fn override_decision(
        &self,
        id: &CommentId,
        admin: &User,
        label: ModerationLabel,
        visible: Option<bool>,
    ) -> Result<Comment, AppError> {
        if !admin.is_admin() {
            return Err(AppError::Forbidden);
        }

        let admin_override = AdminOverride {
            label,
            visible: visible.unwrap_or_else(|| label.default_visibility()),
            reviewed_by: admin.id,
            reviewed_at: Utc::now(),
        };

        let comment = self.comments.set_override(id, &admin_override).await?;
        tracing::info!(
            comment_id = %comment.id,
            admin_id = %admin.id,
            from = %comment.label,
            to = %admin_override.label,
            visible = admin_override.visible,
            "Moderation overridden"
        );
        Ok(comment)
    }

    pub async fn export_csv(&self) -> Result<String, AppError> {
        let comments = self.comments.find_all().await?;
        comments_to_csv(&comments)
    }

    async fn reload(&self, id: &CommentId) -> Result<Comment, AppError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::NotFound(format!("Comment {}", id))))
    }
}
