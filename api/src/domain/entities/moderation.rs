//! Moderation value objects
//!
//! `ClassificationResult` is what the remote classifier says about a text.
//! `ModerationDecision` is what the board does with a comment: its label,
//! the confidence carried through, and whether it is publicly visible.

use serde::{Deserialize, Serialize};

/// Binary verdict produced by the remote classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLabel {
    NonToxic,
    Toxic,
}

impl ClassificationLabel {
    /// The single classifier vocabulary value meaning "not toxic"
    pub const NON_TOXIC_WIRE: &'static str = "NON_TOXIC";

    /// Map a classifier label string; anything but `NON_TOXIC` is toxic.
    pub fn from_wire(label: &str) -> Self {
        if label == Self::NON_TOXIC_WIRE {
            ClassificationLabel::NonToxic
        } else {
            ClassificationLabel::Toxic
        }
    }
}

/// One classifier answer. `confidence` is `confidences[0].confidence` as returned,
/// whatever class the service reports first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: ClassificationLabel,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(label: ClassificationLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }
}

/// Label attached to a stored comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationLabel {
    NonToxic,
    Toxic,
    Blacklisted,
}

impl ModerationLabel {
    /// Storage representation. The only place these strings are spelled out.
    pub fn as_storage_str(&self) -> &'static str {
        match self {
            ModerationLabel::NonToxic => "NON",
            ModerationLabel::Toxic => "TOXIC",
            ModerationLabel::Blacklisted => "BLACKLIST",
        }
    }

    /// Visibility an unreviewed comment with this label gets
    pub fn default_visibility(&self) -> bool {
        matches!(self, ModerationLabel::NonToxic)
    }
}

impl From<ClassificationLabel> for ModerationLabel {
    fn from(label: ClassificationLabel) -> Self {
        match label {
            ClassificationLabel::NonToxic => ModerationLabel::NonToxic,
            ClassificationLabel::Toxic => ModerationLabel::Toxic,
        }
    }
}

impl std::fmt::Display for ModerationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_storage_str())
    }
}

impl std::str::FromStr for ModerationLabel {
    type Err = String;

    /// Accepts the storage strings plus the API spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NON" | "NON_TOXIC" => Ok(ModerationLabel::NonToxic),
            "TOXIC" => Ok(ModerationLabel::Toxic),
            "BLACKLIST" | "BLACKLISTED" => Ok(ModerationLabel::Blacklisted),
            _ => Err(format!("Unknown moderation label: {}", s)),
        }
    }
}

/// Outcome of moderating one comment.
///
/// Fields are private so the label/visibility invariant cannot be broken:
/// `Blacklisted` is always confidence 1.0 and hidden, `Toxic` is hidden,
/// `NonToxic` is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModerationDecision {
    label: ModerationLabel,
    confidence: f64,
    is_visible: bool,
}

impl ModerationDecision {
    /// Hard veto from the blacklist
    pub fn blacklisted() -> Self {
        Self {
            label: ModerationLabel::Blacklisted,
            confidence: 1.0,
            is_visible: false,
        }
    }

    /// Decision mirroring a classifier answer
    pub fn from_classification(result: ClassificationResult) -> Self {
        let label = ModerationLabel::from(result.label);
        Self {
            label,
            confidence: result.confidence,
            is_visible: label.default_visibility(),
        }
    }

    pub fn label(&self) -> ModerationLabel {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }
}
