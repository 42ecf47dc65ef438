//! CSV export of the comment table for offline review

use serde::Serialize;

use crate::domain::entities::Comment;
use crate::error::AppError;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    username: &'a str,
    comment: &'a str,
    label: &'static str,
    confidence: f64,
    visible: bool,
    times_liked: i32,
    times_reported: i32,
    auto_label: &'static str,
    auto_visible: bool,
    reviewed: bool,
    date_posted: String,
}

impl<'a> From<&'a Comment> for CsvRow<'a> {
    fn from(c: &'a Comment) -> Self {
        CsvRow {
            id: c.id.0,
            username: &c.username,
            comment: &c.body,
            label: c.effective_label().as_storage_str(),
            confidence: c.confidence,
            visible: c.is_visible(),
            times_liked: c.times_liked,
            times_reported: c.times_reported,
            auto_label: c.label.as_storage_str(),
            auto_visible: c.auto_visible,
            reviewed: c.is_reviewed(),
            date_posted: c.date_posted(),
        }
    }
}

/// Header row plus one row per comment, labels in their storage form
pub fn comments_to_csv(comments: &[Comment]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if comments.is_empty() {
        writer
            .write_record([
                "id",
                "username",
                "comment",
                "label",
                "confidence",
                "visible",
                "times_liked",
                "times_reported",
                "auto_label",
                "auto_visible",
                "reviewed",
                "date_posted",
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    for comment in comments {
        writer
            .serialize(CsvRow::from(comment))
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}
