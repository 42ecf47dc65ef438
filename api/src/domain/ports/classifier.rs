//! Toxicity classifier port trait
//!
//! Defines the interface for the remote text classification service.

use async_trait::async_trait;

use crate::domain::entities::ClassificationResult;
use crate::error::ClassificationUnavailable;

/// Classifies a single comment text as toxic or not.
///
/// One call is one remote request. No caching, no retry.
#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationUnavailable>;
}
