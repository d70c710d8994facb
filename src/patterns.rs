//! Ordered pattern tables for date, price, frequency and status extraction
//!
//! All matching here runs on lowercased search text (see
//! [`search_text`](crate::search_text)); the patterns are written lowercase
//! to match.

use crate::keywords::KeywordHits;
use crate::types::{Frequency, SubscriptionStatus};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The formats a captured date token is parsed against, in order.
///
/// Month names parse ASCII-case-insensitively, so captures taken from
/// lowercased text are fine.
const DATE_TOKEN_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%Y-%m-%d",
];

/// Trial-date patterns in priority order.
///
/// The first pattern whose capture parses to a real calendar date wins. A
/// pattern that matches but fails to parse (a year-less month and day, or an
/// impossible date like month 13) falls through to the next entry.
static DATE_PATTERNS: std::sync::LazyLock<Vec<Regex>> = std::sync::LazyLock::new(|| {
    [
        // trial ... ends/ending/expires [on] <month day[,] year>
        r"trial.*?(?:ends|ending|expires)\s+(?:on\s+)?([a-z]+\s+\d{1,2},?\s+\d{4})",
        // trial [will] end <month day>, year unstated
        r"trial\s+(?:will\s+)?end\s+([a-z]+\s+\d{1,2})",
        // trial until <iso date>
        r"trial\s+until\s+(\d{4}-\d{2}-\d{2})",
        // trial expires[:] <month day[,] year>
        r"trial\s+expires:?\s+([a-z]+\s+\d{1,2},?\s+\d{4})",
        // bare iso date, with or without a time suffix
        r"(\d{4}-\d{2}-\d{2})(?:t\d{2}:\d{2}(?::\d{2})?(?:\.\d+)?z?)?",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Currency-anchored price patterns in priority order, with the ISO 4217
/// code each symbol implies.
static PRICE_PATTERNS: std::sync::LazyLock<Vec<(Regex, &'static str)>> =
    std::sync::LazyLock::new(|| {
        [
            (r"\$\s*(\d+(?:\.\d{1,2})?)", "USD"),
            (r"€\s*(\d+(?:\.\d{1,2})?)", "EUR"),
            (r"£\s*(\d+(?:\.\d{1,2})?)", "GBP"),
            (r"₹\s*(\d+(?:,\d{3})*(?:\.\d{1,2})?)", "INR"),
        ]
        .iter()
        .map(|(pattern, code)| (Regex::new(pattern).unwrap(), *code))
        .collect()
    });

/// Words that flip the billing cadence to yearly.
const YEARLY_KEYWORDS: &[&str] = &["yearly", "annual", "per year"];

/// A price pulled out of the email text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    /// Numeric amount, thousands separators stripped
    pub amount: f64,

    /// ISO 4217 code implied by the currency symbol
    pub currency: String,
}

fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    DATE_TOKEN_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
}

/// Extract the trial-end (or next-charge) date from lowercased search text.
///
/// Patterns are tried in priority order and each contributes only its first
/// match; a match whose capture does not parse sends resolution to the next
/// pattern, never to the next occurrence.
#[must_use]
pub fn extract_trial_end_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|token| parse_date_token(token.as_str()))
    })
}

/// Extract the first positively-priced currency match from lowercased
/// search text.
///
/// Patterns are tried in currency order and each contributes only its first
/// occurrence; an amount of zero moves resolution to the next currency.
#[must_use]
pub fn extract_price(text: &str) -> Option<Price> {
    PRICE_PATTERNS.iter().find_map(|(pattern, code)| {
        let token = pattern.captures(text)?.get(1)?.as_str().replace(',', "");
        let amount: f64 = token.parse().ok()?;
        (amount > 0.0).then(|| Price {
            amount,
            currency: (*code).to_string(),
        })
    })
}

/// Infer the billing cadence from lowercased search text.
#[must_use]
pub fn infer_frequency(text: &str) -> Frequency {
    if YEARLY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Frequency::Yearly
    } else {
        Frequency::Monthly
    }
}

/// Classify trial versus active subscription.
///
/// Trial when the filter matched a trial phrase or the bare word "trial"
/// occurs anywhere in the text; active otherwise.
#[must_use]
pub fn infer_status(hits: KeywordHits, text: &str) -> SubscriptionStatus {
    if hits.trial || text.contains("trial") {
        SubscriptionStatus::Trial
    } else {
        SubscriptionStatus::Active
    }
}
