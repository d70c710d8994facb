//! Parsing pipeline: filter, extract, score, deduplicate

use crate::keywords::{KeywordHits, search_text};
use crate::patterns::{extract_price, extract_trial_end_date, infer_frequency, infer_status};
use crate::registry::ServiceRegistry;
use crate::score::{CONFIDENCE_THRESHOLD, Evidence};
use crate::types::{EmailMessage, ParsedTrialEmail, SubscriptionStatus};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, trace};

static BUILTIN_PARSER: std::sync::LazyLock<TrialParser> =
    std::sync::LazyLock::new(TrialParser::new);

/// Stateless parser over an immutable service registry.
///
/// The free functions [`parse_email`] and [`parse_emails`] cover the common
/// case; construct a parser directly only to swap in a custom registry.
#[derive(Debug, Clone)]
pub struct TrialParser {
    registry: ServiceRegistry,
}

impl TrialParser {
    /// Parser over the built-in registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ServiceRegistry::default(),
        }
    }

    /// Parser over an injected registry.
    #[must_use]
    pub const fn with_registry(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    /// The registry this parser resolves identities against.
    #[must_use]
    pub const fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Score one email without applying the confidence threshold.
    ///
    /// Still returns `None` when the email carries no trial or billing
    /// keywords or cannot be attributed to a registered service; those are
    /// structural requirements, not score cutoffs. Useful for inspecting
    /// what the extractor saw in emails that end up rejected.
    #[must_use]
    pub fn score_email(&self, email: &EmailMessage) -> Option<(ParsedTrialEmail, Evidence)> {
        let text = search_text(email);
        let hits = KeywordHits::scan(&text);
        if !hits.any() {
            return None;
        }

        let service = self.registry.resolve(&email.from, &text)?;

        let date = extract_trial_end_date(&text);
        let price = extract_price(&text);
        let frequency = infer_frequency(&text);
        let status = infer_status(hits, &text);

        let evidence = Evidence {
            trial_keywords: hits.trial,
            billing_keywords: hits.billing,
            service_resolved: true,
            date_found: date.is_some(),
            pricing_found: price.is_some(),
        };

        // One date slot is filled depending on status; the other stays empty
        let (trial_end_date, next_charge_date) = match status {
            SubscriptionStatus::Trial => (date, None),
            SubscriptionStatus::Active => (None, date),
        };
        let (amount, currency) =
            price.map_or((None, None), |p| (Some(p.amount), Some(p.currency)));

        let record = ParsedTrialEmail {
            service_name: service.name.clone(),
            amount,
            currency,
            trial_end_date,
            next_charge_date,
            frequency,
            status,
            category: service.category.clone(),
            confidence: evidence.confidence(),
        };

        Some((record, evidence))
    }

    /// Parse one email into a record, or `None` when it is not a confident
    /// trial or subscription notice.
    #[must_use]
    pub fn parse_email(&self, email: &EmailMessage) -> Option<ParsedTrialEmail> {
        let (record, _) = self.score_email(email)?;
        if record.confidence < CONFIDENCE_THRESHOLD {
            trace!(
                "Dropping {} candidate from {}: confidence {:.2} below threshold",
                record.service_name, email.from, record.confidence
            );
            return None;
        }

        debug!(
            "Parsed {} notice: {} with confidence {:.2}",
            record.status, record.service_name, record.confidence
        );

        Some(record)
    }

    /// Parse a batch of emails, keeping the highest-confidence record per
    /// service.
    ///
    /// Replacement requires strictly greater confidence, so on a tie the
    /// record seen first wins. Output order follows first occurrence per
    /// service.
    #[must_use]
    pub fn parse_emails(&self, emails: &[EmailMessage]) -> Vec<ParsedTrialEmail> {
        let mut kept: Vec<ParsedTrialEmail> = Vec::new();
        let mut slot_by_service: HashMap<String, usize> = HashMap::new();

        for email in emails {
            let Some(record) = self.parse_email(email) else {
                continue;
            };
            match slot_by_service.entry(record.service_name.clone()) {
                Entry::Occupied(entry) => {
                    let slot = *entry.get();
                    if record.confidence > kept[slot].confidence {
                        kept[slot] = record;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(kept.len());
                    kept.push(record);
                }
            }
        }

        debug!("Parsed {} records from {} emails", kept.len(), emails.len());
        kept
    }
}

impl Default for TrialParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one email against the built-in registry.
#[must_use]
pub fn parse_email(email: &EmailMessage) -> Option<ParsedTrialEmail> {
    BUILTIN_PARSER.parse_email(email)
}

/// Parse a batch of emails against the built-in registry, deduplicated to
/// one record per service.
#[must_use]
pub fn parse_emails(emails: &[EmailMessage]) -> Vec<ParsedTrialEmail> {
    BUILTIN_PARSER.parse_emails(emails)
}
