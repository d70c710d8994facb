//! Known-service registry and sender identity resolution

use crate::error::RegistryError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Built-in table: service name, sender domains, content patterns, category.
///
/// Declaration order is resolution priority order.
const BUILTIN_SERVICES: &[(&str, &[&str], &[&str], &str)] = &[
    // Streaming
    ("Netflix", &["netflix.com"], &["netflix"], "Entertainment"),
    (
        "Disney+",
        &["disneyplus.com", "disney.com"],
        &[r"disney\+", "disney plus"],
        "Entertainment",
    ),
    ("Hulu", &["hulu.com"], &["hulu"], "Entertainment"),
    (
        "Amazon Prime",
        &["amazon.com", "primevideo.com"],
        &["amazon prime", "prime video"],
        "Entertainment",
    ),
    (
        "YouTube Premium",
        &["youtube.com"],
        &["youtube premium", "youtube music"],
        "Entertainment",
    ),
    ("Audible", &["audible.com"], &["audible"], "Entertainment"),
    // Music
    ("Spotify", &["spotify.com"], &["spotify"], "Music"),
    (
        "Apple Music",
        &["apple.com", "itunes.com"],
        &["apple music", "itunes"],
        "Music",
    ),
    // Design
    ("Figma", &["figma.com"], &["figma"], "Design"),
    ("Canva", &["canva.com"], &["canva"], "Design"),
    (
        "Adobe Creative Cloud",
        &["adobe.com"],
        &["adobe", "creative cloud", "photoshop"],
        "Design",
    ),
    // Productivity
    ("Notion", &["notion.so", "notion.com"], &["notion"], "Productivity"),
    ("Slack", &["slack.com"], &["slack"], "Productivity"),
    ("Zoom", &["zoom.us"], &["zoom"], "Productivity"),
    ("Grammarly", &["grammarly.com"], &["grammarly"], "Productivity"),
    // Storage and developer tools
    ("Dropbox", &["dropbox.com"], &["dropbox"], "Cloud Storage"),
    (
        "Google One",
        &["google.com"],
        &["google one", "google storage"],
        "Cloud Storage",
    ),
    ("GitHub", &["github.com"], &["github"], "Developer Tools"),
    // AI and learning
    ("ChatGPT", &["openai.com"], &["chatgpt", "openai"], "AI"),
    ("Duolingo", &["duolingo.com"], &["duolingo"], "Education"),
];

static BUILTIN: std::sync::LazyLock<ServiceRegistry> = std::sync::LazyLock::new(|| {
    let services = BUILTIN_SERVICES
        .iter()
        .map(|(name, domains, patterns, category)| ServiceDescriptor {
            name: (*name).to_string(),
            domains: domains.iter().map(|d| (*d).to_string()).collect(),
            content_patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
            category: (*category).to_string(),
        })
        .collect();
    ServiceRegistry { services }
});

/// One known subscription provider: how to recognize it, how to categorize
/// it.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Display name, used as the record's service name
    pub name: String,

    /// Lowercase domain substrings recognized in the sender value
    pub domains: Vec<String>,

    /// Patterns tried against the lowercased subject and body
    pub content_patterns: Vec<Regex>,

    /// Budget category the service belongs to
    pub category: String,
}

impl ServiceDescriptor {
    /// True when the lowercased sender value contains one of the registered
    /// domains.
    #[must_use]
    pub fn matches_sender(&self, sender: &str) -> bool {
        self.domains.iter().any(|domain| sender.contains(domain.as_str()))
    }

    /// True when any content pattern matches the lowercased search text.
    #[must_use]
    pub fn matches_content(&self, text: &str) -> bool {
        self.content_patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// Plain-data service descriptor, the shape injected registries are built
/// from, typically via JSON configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Display name
    pub name: String,

    /// Domain substrings; stored lowercased
    #[serde(default)]
    pub domains: Vec<String>,

    /// Content regex sources, matched against lowercased text
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Budget category
    pub category: String,
}

/// Ordered, immutable table of known services.
///
/// Built once and shared freely; resolution never mutates it, so it is
/// `Send + Sync` and safe behind a `'static` reference.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    /// The built-in table of twenty widely used subscription services.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a registry from plain-data specs, preserving their order as
    /// resolution priority.
    ///
    /// Rejects empty service names and content patterns that do not
    /// compile. A descriptor with no domains and no patterns is accepted
    /// but can never match; it is logged and kept.
    pub fn from_specs(specs: Vec<ServiceSpec>) -> Result<Self, RegistryError> {
        let mut services = Vec::with_capacity(specs.len());

        for (index, spec) in specs.into_iter().enumerate() {
            let ServiceSpec {
                name,
                domains,
                patterns,
                category,
            } = spec;

            if name.trim().is_empty() {
                return Err(RegistryError::EmptyName(index));
            }
            if domains.is_empty() && patterns.is_empty() {
                warn!("Service {name} has no domains or content patterns and can never match");
            }

            let mut content_patterns = Vec::with_capacity(patterns.len());
            for pattern in &patterns {
                let compiled =
                    Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
                        service: name.clone(),
                        pattern: pattern.clone(),
                        source,
                    })?;
                content_patterns.push(compiled);
            }

            services.push(ServiceDescriptor {
                name,
                domains: domains.iter().map(|d| d.to_lowercase()).collect(),
                content_patterns,
                category,
            });
        }

        Ok(Self { services })
    }

    /// Build a registry from a JSON array of [`ServiceSpec`] values.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let specs: Vec<ServiceSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True when no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Descriptors in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, ServiceDescriptor> {
        self.services.iter()
    }

    /// Resolve the service an email belongs to.
    ///
    /// Two full passes in priority order: sender-domain matches first, then
    /// content-pattern matches only if no domain matched anywhere. Domain
    /// evidence always outranks content evidence, regardless of table
    /// position.
    #[must_use]
    pub fn resolve(&self, from: &str, text: &str) -> Option<&ServiceDescriptor> {
        let sender = from.to_lowercase();
        self.services
            .iter()
            .find(|service| service.matches_sender(&sender))
            .or_else(|| {
                self.services
                    .iter()
                    .find(|service| service.matches_content(text))
            })
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl<'a> IntoIterator for &'a ServiceRegistry {
    type Item = &'a ServiceDescriptor;
    type IntoIter = std::slice::Iter<'a, ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
