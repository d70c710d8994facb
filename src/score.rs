//! Evidence weighting and the confidence threshold

use serde::{Deserialize, Serialize};

/// Weight for trial keywords in the search text.
pub const TRIAL_KEYWORDS_WEIGHT: f64 = 0.30;

/// Weight for billing keywords in the search text.
pub const BILLING_KEYWORDS_WEIGHT: f64 = 0.20;

/// Weight for resolving the sender to a registered service.
pub const SERVICE_RESOLVED_WEIGHT: f64 = 0.30;

/// Weight for extracting a usable date.
pub const DATE_FOUND_WEIGHT: f64 = 0.15;

/// Weight for extracting a positive price.
pub const PRICING_FOUND_WEIGHT: f64 = 0.05;

/// Minimum confidence for a record to be returned at all.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// The boolean extraction outcomes that feed the confidence score.
///
/// Exposed so callers can see why a score came out the way it did;
/// [`TrialParser::score_email`](crate::TrialParser::score_email) returns it
/// alongside the unthresholded record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    /// Trial keywords occurred
    pub trial_keywords: bool,

    /// Billing keywords occurred
    pub billing_keywords: bool,

    /// Sender or content matched a registered service
    pub service_resolved: bool,

    /// A date pattern matched and parsed to a real calendar date
    pub date_found: bool,

    /// A currency pattern yielded a positive amount
    pub pricing_found: bool,
}

impl Evidence {
    /// Weighted sum of the evidence bits, before clamping.
    #[must_use]
    pub const fn raw_score(self) -> f64 {
        let mut score = 0.0;
        if self.trial_keywords {
            score += TRIAL_KEYWORDS_WEIGHT;
        }
        if self.billing_keywords {
            score += BILLING_KEYWORDS_WEIGHT;
        }
        if self.service_resolved {
            score += SERVICE_RESOLVED_WEIGHT;
        }
        if self.date_found {
            score += DATE_FOUND_WEIGHT;
        }
        if self.pricing_found {
            score += PRICING_FOUND_WEIGHT;
        }
        score
    }

    /// Confidence clamped into `[0.0, 1.0]`.
    ///
    /// The default weights sum to exactly 1.0; the clamp is part of the
    /// output contract and holds if they are ever retuned.
    #[must_use]
    pub fn confidence(self) -> f64 {
        self.raw_score().min(1.0)
    }

    /// Whether the confidence clears [`CONFIDENCE_THRESHOLD`].
    #[must_use]
    pub fn accepted(self) -> bool {
        self.confidence() >= CONFIDENCE_THRESHOLD
    }
}
