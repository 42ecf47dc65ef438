//! Comment domain entity
//!
//! A comment carries the automated moderation decision it was stored with,
//! engagement counters, and an optional admin override that supersedes the
//! automated label and visibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ModerationDecision, ModerationLabel, UserId};

/// Unique identifier for a comment (database sequence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl From<i64> for CommentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An admin's correction of the automated decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverride {
    pub label: ModerationLabel,
    pub visible: bool,
    pub reviewed_by: UserId,
    pub reviewed_at: DateTime<Utc>,
}

/// A stored comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub username: String,
    pub body: String,
    /// Automated label
    pub label: ModerationLabel,
    pub confidence: f64,
    /// Automated visibility
    pub auto_visible: bool,
    pub times_liked: i32,
    pub times_reported: i32,
    pub admin_override: Option<AdminOverride>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn effective_label(&self) -> ModerationLabel {
        self.admin_override
            .as_ref()
            .map(|o| o.label)
            .unwrap_or(self.label)
    }

    pub fn is_visible(&self) -> bool {
        self.admin_override
            .as_ref()
            .map(|o| o.visible)
            .unwrap_or(self.auto_visible)
    }

    pub fn is_reviewed(&self) -> bool {
        self.admin_override.is_some()
    }

    /// Unreviewed and either hidden by moderation or reported often enough
    pub fn needs_review(&self, report_threshold: i32) -> bool {
        !self.is_reviewed() && (!self.auto_visible || self.times_reported >= report_threshold)
    }

    /// Human date, e.g. "March 04, 2024 09:15PM"
    pub fn date_posted(&self) -> String {
        self.created_at.format("%B %d, %Y %I:%M%p").to_string()
    }
}

/// Data needed to store a freshly moderated comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: UserId,
    pub username: String,
    pub body: String,
    pub decision: ModerationDecision,
}

/// Public listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    #[default]
    Liked,
    Oldest,
    Newest,
}

impl std::fmt::Display for CommentSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentSort::Liked => write!(f, "liked"),
            CommentSort::Oldest => write!(f, "oldest"),
            CommentSort::Newest => write!(f, "newest"),
        }
    }
}

impl std::str::FromStr for CommentSort {
    type Err = String;

    /// Also accepts the numeric codes of the old board (1, 2, 3).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "liked" | "1" => Ok(CommentSort::Liked),
            "oldest" | "2" => Ok(CommentSort::Oldest),
            "newest" | "3" => Ok(CommentSort::Newest),
            _ => Err(format!("Unknown sort: {}", s)),
        }
    }
}

/// One page of a listing plus the total number of matching rows
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn comment(label: ModerationLabel, auto_visible: bool) -> Comment {
        Comment {
            id: CommentId(1),
            user_id: UserId(Uuid::nil()),
            username: "ali-veli-x".to_string(),
            body: "yemekler güzel".to_string(),
            label,
            confidence: 0.9,
            auto_visible,
            times_liked: 0,
            times_reported: 0,
            admin_override: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 4, 21, 15, 0).unwrap(),
        }
    }

    #[test]
    fn effective_fields_follow_override() {
        let mut c = comment(ModerationLabel::Toxic, false);
        assert_eq!(c.effective_label(), ModerationLabel::Toxic);
        assert!(!c.is_visible());

        c.admin_override = Some(AdminOverride {
            label: ModerationLabel::NonToxic,
            visible: true,
            reviewed_by: UserId(Uuid::nil()),
            reviewed_at: Utc::now(),
        });

        assert_eq!(c.effective_label(), ModerationLabel::NonToxic);
        assert!(c.is_visible());
        // automated fields survive for audit
        assert_eq!(c.label, ModerationLabel::Toxic);
    }

    #[test]
    fn needs_review_hidden_or_reported() {
        let hidden = comment(ModerationLabel::Blacklisted, false);
        assert!(hidden.needs_review(3));

        let mut visible = comment(ModerationLabel::NonToxic, true);
        assert!(!visible.needs_review(3));
        visible.times_reported = 3;
        assert!(visible.needs_review(3));

        visible.admin_override = Some(AdminOverride {
            label: ModerationLabel::NonToxic,
            visible: true,
            reviewed_by: UserId(Uuid::nil()),
            reviewed_at: Utc::now(),
        });
        assert!(!visible.needs_review(3));
    }

    #[test]
    fn date_posted_format() {
        let c = comment(ModerationLabel::NonToxic, true);
        assert_eq!(c.date_posted(), "March 04, 2024 09:15PM");
    }

    #[test]
    fn sort_from_str() {
        assert_eq!("liked".parse::<CommentSort>().unwrap(), CommentSort::Liked);
        assert_eq!("2".parse::<CommentSort>().unwrap(), CommentSort::Oldest);
        assert_eq!("NEWEST".parse::<CommentSort>().unwrap(), CommentSort::Newest);
        assert!("random".parse::<CommentSort>().is_err());
        assert_eq!(CommentSort::default(), CommentSort::Liked);
    }
}
