//! Core types for trial and subscription detection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single email as handed over by the transport layer.
///
/// All fields are expected to be decoded text already; fetching, base64
/// decoding and HTML stripping belong to the transport side (see
/// [`EmailMessage::from_raw`](crate::EmailMessage::from_raw)).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    /// Provider-assigned message identifier
    pub id: String,

    /// Subject line
    pub subject: String,

    /// Plain text body
    pub body: String,

    /// Raw sender value, either a bare address or `Name <address>`
    pub from: String,

    /// Message date as reported by the provider, carried through untouched
    pub date: String,
}

impl EmailMessage {
    /// Build a message from its parts.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            date: date.into(),
        }
    }
}

/// Billing cadence inferred from the email text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Charged every month; assumed when nothing says otherwise
    #[default]
    Monthly,

    /// Charged once a year
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the email describes a running trial or a live subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Trial wording was present
    Trial,

    /// Billing wording only
    Active,
}

impl SubscriptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured trial or subscription record produced from one email.
///
/// Records exist only for emails that resolved to a known service and whose
/// confidence reached [`CONFIDENCE_THRESHOLD`](crate::CONFIDENCE_THRESHOLD);
/// everything below that is dropped silently rather than surfaced as a
/// low-quality record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTrialEmail {
    /// Registry name of the resolved service
    pub service_name: String,

    /// Detected price, if any
    pub amount: Option<f64>,

    /// ISO 4217 code paired with `amount`
    pub currency: Option<String>,

    /// End of the trial period, for [`SubscriptionStatus::Trial`] records
    pub trial_end_date: Option<NaiveDate>,

    /// Next expected charge, for [`SubscriptionStatus::Active`] records
    pub next_charge_date: Option<NaiveDate>,

    /// Billing cadence
    pub frequency: Frequency,

    /// Trial or active subscription
    pub status: SubscriptionStatus,

    /// Budget category of the resolved service
    pub category: String,

    /// Evidence-weighted confidence in `[0.0, 1.0]`
    pub confidence: f64,
}

impl ParsedTrialEmail {
    /// The extracted date, whichever slot it was filed under.
    ///
    /// A trial record carries it as `trial_end_date`, an active one as
    /// `next_charge_date`; at most one of the two is ever set.
    #[must_use]
    pub const fn relevant_date(&self) -> Option<NaiveDate> {
        match self.status {
            SubscriptionStatus::Trial => self.trial_end_date,
            SubscriptionStatus::Active => self.next_charge_date,
        }
    }
}

impl fmt::Display for ParsedTrialEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, confidence {:.2})",
            self.service_name, self.status, self.frequency, self.confidence
        )
    }
}
