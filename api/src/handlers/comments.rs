//! Comment handlers
//!
//! Public board endpoints plus posting, liking and reporting.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Comment, CommentId, CommentSort, ModerationLabel, Page, User};
use crate::error::AppError;
use crate::AppState;

/// Public view of a comment
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub username: String,
    pub comment: String,
    pub label: ModerationLabel,
    pub confidence: f64,
    pub times_liked: i32,
    pub times_reported: i32,
    pub created_at: String,
    /// e.g. "March 04, 2024 09:15PM"
    pub date_posted: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id.0,
            label: comment.effective_label(),
            date_posted: comment.date_posted(),
            created_at: comment.created_at.to_rfc3339(),
            username: comment.username,
            comment: comment.body,
            confidence: comment.confidence,
            times_liked: comment.times_liked,
            times_reported: comment.times_reported,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<C: Into<T>>(page: Page<C>) -> Self {
        PageResponse {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
        }
    }
}

/// Query parameters for listing comments
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    /// liked | oldest | newest, or 1 | 2 | 3
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Request body for posting a comment
#[derive(Debug, Deserialize)]
pub struct SubmitCommentRequest {
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitCommentResponse {
    pub comment: CommentResponse,
    /// False when moderation held the comment back
    pub published: bool,
    pub message: String,
}

fn parse_sort(raw: Option<&str>) -> Result<CommentSort, AppError> {
    match raw {
        None => Ok(CommentSort::default()),
        Some(s) => s.parse().map_err(AppError::BadRequest),
    }
}

/// GET /comments
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<PageResponse<CommentResponse>>, AppError> {
    let sort = parse_sort(query.sort.as_deref())?;
    let page = state
        .board_service
        .list_visible(sort, query.page, query.per_page)
        .await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// GET /comments/search
pub async fn search_comments(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PageResponse<CommentResponse>>, AppError> {
    let page = state
        .board_service
        .search(&query.q, query.page, query.per_page)
        .await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// GET /comments/:id
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state.board_service.get_visible(&CommentId(id)).await?;
    Ok(Json(comment.into()))
}

/// POST /comments
///
/// 201 when published, 202 when held back by moderation.
pub async fn submit_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<SubmitCommentRequest>,
) -> Result<(StatusCode, Json<SubmitCommentResponse>), AppError> {
    let comment = state
        .board_service
        .submit_comment(&user, &request.comment)
        .await?;

    let published = comment.is_visible();
    let (status, message) = if published {
        (StatusCode::CREATED, "Comment published")
    } else {
        (
            StatusCode::ACCEPTED,
            "Comment held for review by moderation",
        )
    };

    Ok((
        status,
        Json(SubmitCommentResponse {
            comment: comment.into(),
            published,
            message: message.to_string(),
        }),
    ))
}

/// POST /comments/:id/like
pub async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state.board_service.like(&CommentId(id)).await?;
    Ok(Json(comment.into()))
}

/// POST /comments/:id/report
pub async fn report_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state.board_service.report(&CommentId(id)).await?;
    tracing::debug!(comment_id = id, reporter = %user.id, "Comment reported");
    Ok(Json(comment.into()))
}
