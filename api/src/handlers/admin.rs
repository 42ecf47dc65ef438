//! Admin handlers
//!
//! Review queue, full listing, moderation overrides and CSV export.
//! Mounted behind `auth_middleware` and `require_admin`.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Comment, CommentId, ModerationLabel, User};
use crate::error::AppError;
use crate::handlers::comments::PageResponse;
use crate::AppState;

/// Full view of a comment, automated decision and override side by side
#[derive(Debug, Serialize)]
pub struct AdminCommentResponse {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub comment: String,
    pub label: ModerationLabel,
    pub visible: bool,
    pub auto_label: ModerationLabel,
    pub auto_visible: bool,
    pub confidence: f64,
    pub times_liked: i32,
    pub times_reported: i32,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
    pub date_posted: String,
}

impl From<Comment> for AdminCommentResponse {
    fn from(comment: Comment) -> Self {
        AdminCommentResponse {
            id: comment.id.0,
            user_id: comment.user_id.to_string(),
            label: comment.effective_label(),
            visible: comment.is_visible(),
            auto_label: comment.label,
            auto_visible: comment.auto_visible,
            confidence: comment.confidence,
            times_liked: comment.times_liked,
            times_reported: comment.times_reported,
            reviewed_by: comment
                .admin_override
                .as_ref()
                .map(|o| o.reviewed_by.to_string()),
            reviewed_at: comment
                .admin_override
                .as_ref()
                .map(|o| o.reviewed_at.to_rfc3339()),
            created_at: comment.created_at.to_rfc3339(),
            date_posted: comment.date_posted(),
            username: comment.username,
            comment: comment.body,
        }
    }
}

/// Query parameters for admin listings
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    /// NON | TOXIC | BLACKLIST (list_all only)
    pub label: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Request body for an override
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    pub label: String,
    /// Defaults to true for NON and false otherwise
    #[serde(default)]
    pub visible: Option<bool>,
}

fn parse_label(raw: &str) -> Result<ModerationLabel, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// GET /admin/review
pub async fn review_queue(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<PageResponse<AdminCommentResponse>>, AppError> {
    let page = state
        .board_service
        .review_queue(query.limit, query.offset)
        .await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// GET /admin/comments
pub async fn list_all_comments(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<PageResponse<AdminCommentResponse>>, AppError> {
    let label = query.label.as_deref().map(parse_label).transpose()?;
    let page = state
        .board_service
        .list_all(label, query.limit, query.offset)
        .await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// POST /admin/comments/:id/override
pub async fn override_comment(
    State(state): State<AppState>,
    Extension(admin): Extension<User>,
    Path(id): Path<i64>,
    Json(request): Json<OverrideRequest>,
) -> Result<Json<AdminCommentResponse>, AppError> {
    let label = parse_label(&request.label)?;
    let comment = state
        .board_service
        .override_decision(&CommentId(id), &admin, label, request.visible)
        .await?;

    Ok(Json(comment.into()))
}

/// GET /admin/export.csv
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = state.board_service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"comments.csv\"",
            ),
        ],
        csv,
    ))
}
