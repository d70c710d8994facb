//! Candidate filtering on trial and billing keywords

use crate::types::EmailMessage;
use serde::{Deserialize, Serialize};

/// Trial phrases recognized by the candidate filter.
pub const TRIAL_KEYWORDS: &[&str] = &[
    "free trial",
    "trial period",
    "trial expires",
    "trial ends",
    "trial ending",
    "trial subscription",
    "start your trial",
    "your trial",
    "trial version",
    "premium trial",
];

/// Billing words recognized by the candidate filter.
pub const BILLING_KEYWORDS: &[&str] = &[
    "subscription",
    "billing",
    "payment",
    "charge",
    "invoice",
    "receipt",
    "renewal",
    "auto-renewal",
    "recurring",
];

/// The lowercased haystack every matching stage works on: subject and body
/// joined with a single space.
#[must_use]
pub fn search_text(email: &EmailMessage) -> String {
    format!("{} {}", email.subject, email.body).to_lowercase()
}

/// Which keyword classes appeared in the search text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordHits {
    /// At least one [`TRIAL_KEYWORDS`] phrase occurred
    pub trial: bool,

    /// At least one [`BILLING_KEYWORDS`] word occurred
    pub billing: bool,
}

impl KeywordHits {
    /// Scan lowercased text for both keyword classes.
    ///
    /// Matching is plain substring containment, not word-boundary aware, so
    /// "invoiced" satisfies "invoice".
    #[must_use]
    pub fn scan(text: &str) -> Self {
        Self {
            trial: TRIAL_KEYWORDS.iter().any(|kw| text.contains(kw)),
            billing: BILLING_KEYWORDS.iter().any(|kw| text.contains(kw)),
        }
    }

    /// True when either keyword class matched.
    #[must_use]
    pub const fn any(self) -> bool {
        self.trial || self.billing
    }
}

/// Keyword gate deciding whether an email is worth extracting from at all.
///
/// Deliberately permissive: the confidence threshold downstream, not this
/// gate, is what separates real notices from noise.
#[must_use]
pub fn is_candidate(email: &EmailMessage) -> bool {
    KeywordHits::scan(&search_text(email)).any()
}
