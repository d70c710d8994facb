//! Error types for the fallible edges of the crate
//!
//! The parsing pipeline itself never errors: unmatched keywords, unresolved
//! services and unparseable dates or prices degrade to missing fields or an
//! omitted record. Errors exist only where the crate touches caller-supplied
//! raw material, mail bytes and registry documents.

use thiserror::Error;

/// Errors that can occur while building an
/// [`EmailMessage`](crate::EmailMessage) from raw mail bytes.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse the mail structure
    #[error("Failed to parse mail structure: {0}")]
    Structure(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Errors that can occur while validating an injected service registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A descriptor has no service name
    #[error("Service descriptor at index {0} has an empty name")]
    EmptyName(usize),

    /// A content pattern does not compile
    #[error("Invalid content pattern {pattern:?} for service {service:?}")]
    InvalidPattern {
        service: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The registry document is not valid JSON
    #[error("Malformed registry document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for mail ingestion operations
pub type Result<T> = std::result::Result<T, ParseError>;
