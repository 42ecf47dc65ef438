//! PostgreSQL adapter for CommentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, Statement,
};

use crate::domain::entities::{
    AdminOverride, Comment, CommentId, CommentSort, ModerationLabel, NewComment, Page, UserId,
};
use crate::domain::ports::CommentRepository;
use crate::entity::comments;
use crate::error::DomainError;

/// PostgreSQL implementation of CommentRepository
pub struct PostgresCommentRepository {
    db: DatabaseConnection,
}

impl PostgresCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn page(
        &self,
        select: Select<comments::Entity>,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = select
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Page {
            items: results.into_iter().map(|m| m.into()).collect(),
            total,
        })
    }

    async fn increment(&self, column: &'static str, id: &CommentId) -> Result<(), DomainError> {
        // Single UPDATE so concurrent likes/reports are never lost
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            format!("UPDATE comments SET {column} = {column} + 1 WHERE id = $1"),
            [id.0.into()],
        );

        let result = self
            .db
            .execute(stmt)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Comment {}", id)));
        }
        Ok(())
    }
}

/// Override visibility when reviewed, automated visibility otherwise
fn visible() -> Condition {
    Condition::any()
        .add(comments::Column::OverrideVisible.eq(true))
        .add(
            Condition::all()
                .add(comments::Column::OverrideVisible.is_null())
                .add(comments::Column::IsVisible.eq(true)),
        )
}

fn effective_label_is(label: ModerationLabel) -> Condition {
    let stored = label.as_storage_str();
    Condition::any()
        .add(comments::Column::OverrideLabel.eq(stored))
        .add(
            Condition::all()
                .add(comments::Column::OverrideLabel.is_null())
                .add(comments::Column::Label.eq(stored)),
        )
}

fn needs_review(report_threshold: i32) -> Condition {
    Condition::all()
        .add(comments::Column::ReviewedAt.is_null())
        .add(
            Condition::any()
                .add(comments::Column::IsVisible.eq(false))
                .add(comments::Column::TimesReported.gte(report_threshold)),
        )
}

/// `%`, `_` and `\\` match literally inside LIKE patterns
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn sorted(select: Select<comments::Entity>, sort: CommentSort) -> Select<comments::Entity> {
    match sort {
        CommentSort::Liked => select
            .order_by_desc(comments::Column::TimesLiked)
            .order_by_asc(comments::Column::Id),
        CommentSort::Oldest => select
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id),
        CommentSort::Newest => select
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id),
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let decision = &comment.decision;

        let model = comments::ActiveModel {
            user_id: Set(comment.user_id.0),
            username: Set(comment.username.clone()),
            body: Set(comment.body.clone()),
            label: Set(decision.label().as_storage_str().to_string()),
            confidence: Set(decision.confidence()),
            is_visible: Set(decision.is_visible()),
            times_liked: Set(0),
            times_reported: Set(0),
            override_label: Set(None),
            override_visible: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let result = comments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_visible(
        &self,
        sort: CommentSort,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let select = sorted(comments::Entity::find().filter(visible()), sort);
        self.page(select, limit, offset).await
    }

    async fn search_visible(
        &self,
        query: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let select = sorted(
            comments::Entity::find()
                .filter(visible())
                .filter(comments::Column::Body.contains(escape_like(query))),
            CommentSort::Newest,
        );
        self.page(select, limit, offset).await
    }

    async fn increment_likes(&self, id: &CommentId) -> Result<(), DomainError> {
        self.increment("times_liked", id).await
    }

    async fn increment_reports(&self, id: &CommentId) -> Result<(), DomainError> {
        self.increment("times_reported", id).await
    }

    async fn find_needing_review(
        &self,
        report_threshold: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let select = sorted(
            comments::Entity::find().filter(needs_review(report_threshold)),
            CommentSort::Oldest,
        );
        self.page(select, limit, offset).await
    }

    async fn list_all(
        &self,
        label: Option<ModerationLabel>,
        limit: u64,
        offset: u64,
    ) -> Result<Page<Comment>, DomainError> {
        let mut select = comments::Entity::find();
        if let Some(label) = label {
            select = select.filter(effective_label_is(label));
        }
        self.page(sorted(select, CommentSort::Newest), limit, offset)
            .await
    }

    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        let results = comments::Entity::find()
            .order_by_asc(comments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn set_override(
        &self,
        id: &CommentId,
        admin_override: &AdminOverride,
    ) -> Result<Comment, DomainError> {
        let result = comments::ActiveModel {
            id: Set(id.0),
            override_label: Set(Some(admin_override.label.as_storage_str().to_string())),
            override_visible: Set(Some(admin_override.visible)),
            reviewed_by: Set(Some(admin_override.reviewed_by.0)),
            reviewed_at: Set(Some(admin_override.reviewed_at.fixed_offset())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Comment {}", id)),
            other => DomainError::Database(other.to_string()),
        })?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<comments::Model> for Comment {
    fn from(model: comments::Model) -> Self {
        let admin_override = match (
            model.override_label,
            model.override_visible,
            model.reviewed_by,
            model.reviewed_at,
        ) {
            (Some(label), Some(visible), Some(reviewed_by), Some(reviewed_at)) => {
                Some(AdminOverride {
                    label: label.parse().unwrap_or(ModerationLabel::Toxic),
                    visible,
                    reviewed_by: UserId(reviewed_by),
                    reviewed_at: reviewed_at.with_timezone(&Utc),
                })
            }
            _ => None,
        };

        Comment {
            id: CommentId(model.id),
            user_id: UserId(model.user_id),
            username: model.username,
            body: model.body,
            label: model.label.parse().unwrap_or(ModerationLabel::Toxic),
            confidence: model.confidence,
            auto_visible: model.is_visible,
            times_liked: model.times_liked,
            times_reported: model.times_reported,
            admin_override,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
