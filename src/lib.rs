// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Trial and Subscription Email Parser
//!
//! A heuristic parsing library that turns already-fetched email text into
//! structured trial and subscription records with a bounded confidence
//! score.
//!
//! # Features
//!
//! - Keyword gate over trial and billing vocabulary
//! - Domain-first service identity against an ordered registry of known
//!   services, injectable from JSON
//! - Ordered pattern tables for trial-end dates, prices, billing cadence
//!   and trial-versus-active status
//! - Weighted, clamped confidence scoring with a hard floor below which
//!   records are dropped silently
//! - Batch deduplication down to one record per service
//! - Optional raw-mail ingestion and HTML flattening via `mailparse`
//!
//! # Example
//!
//! ```rust
//! use trial_extract::{parse_email, EmailMessage};
//!
//! let email = EmailMessage::new(
//!     "msg-1",
//!     "Your Notion Pro trial expires soon",
//!     "Your free trial of Notion Pro expires on August 5, 2025. \
//!      You will be charged $10.00 monthly after the trial ends.",
//!     "noreply@notion.so",
//!     "2025-07-29",
//! );
//!
//! let record = parse_email(&email).unwrap();
//! assert_eq!(record.service_name, "Notion");
//! assert_eq!(record.amount, Some(10.0));
//! assert_eq!(record.trial_end_date.unwrap().to_string(), "2025-08-05");
//! ```

mod error;
mod ingest;
mod keywords;
mod parser;
mod patterns;
mod registry;
mod score;
mod types;

pub use error::{ParseError, RegistryError, Result};
pub use ingest::strip_html;
pub use keywords::*;
pub use parser::{parse_email, parse_emails, TrialParser};
pub use patterns::*;
pub use registry::*;
pub use score::*;
pub use types::*;
