//! Moderation service
//!
//! Decides a comment's fate. The blacklist is checked first and, on a hit,
//! the classifier is never called. Otherwise the classifier answer is mirrored
//! into the decision. Classifier failures are returned as-is.

use std::sync::Arc;

use crate::domain::blacklist::Blacklist;
use crate::domain::entities::ModerationDecision;
use crate::domain::ports::ToxicityClassifier;
use crate::error::ClassificationUnavailable;

pub struct ModerationService<C>
where
    C: ToxicityClassifier,
{
    classifier: Arc<C>,
    blacklist: Arc<Blacklist>,
}

impl<C> ModerationService<C>
where
    C: ToxicityClassifier,
{
    pub fn new(classifier: Arc<C>, blacklist: Arc<Blacklist>) -> Self {
        Self {
            classifier,
            blacklist,
        }
    }

    pub async fn moderate(&self, text: &str) -> Result<ModerationDecision, ClassificationUnavailable> {
        if self.blacklist.contains_blacklisted(text) {
            let decision = ModerationDecision::blacklisted();
            tracing::info!(
                label = %decision.label(),
                confidence = decision.confidence(),
                blacklisted = true,
                "Comment moderated"
            );
            return Ok(decision);
        }

        let result = self.classifier.classify(text).await?;
        let decision = ModerationDecision::from_classification(result);

        tracing::info!(
            label = %decision.label(),
            confidence = decision.confidence(),
            blacklisted = false,
            "Comment moderated"
        );
        Ok(decision)
    }
}
