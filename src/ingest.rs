//! Transport-side helpers for turning raw mail into [`EmailMessage`] values
//!
//! The parsing pipeline consumes already-decoded text. These helpers are for
//! transports that hold raw RFC 822 bytes or HTML-only bodies and need to
//! flatten them first.

use crate::error::{ParseError, Result};
use crate::types::EmailMessage;

impl EmailMessage {
    /// Build a message from one raw RFC 822 email.
    ///
    /// The From header is required; subject and date default to empty
    /// strings when absent. The body prefers the first `text/plain` part
    /// and falls back to stripped `text/html`.
    pub fn from_raw(id: impl Into<String>, raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

        let from = header_value(&parsed.headers, "from")
            .ok_or_else(|| ParseError::MissingHeader("From".into()))?;
        let subject = header_value(&parsed.headers, "subject").unwrap_or_default();
        let date = header_value(&parsed.headers, "date").unwrap_or_default();
        let body = body_text(&parsed);

        Ok(Self {
            id: id.into(),
            subject,
            body,
            from,
            date,
        })
    }
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(mailparse::MailHeader::get_value)
}

fn body_text(parsed: &mailparse::ParsedMail) -> String {
    let mut plain = String::new();
    let mut html = String::new();
    collect_bodies(parsed, &mut plain, &mut html);

    if plain.is_empty() {
        strip_html(&html)
    } else {
        plain
    }
}

/// Walk the part tree, keeping the first plain and first HTML leaf.
fn collect_bodies(part: &mailparse::ParsedMail, plain: &mut String, html: &mut String) {
    if part.subparts.is_empty() {
        let mimetype = part.ctype.mimetype.to_lowercase();
        if let Ok(body) = part.get_body() {
            if mimetype.contains("text/html") {
                if html.is_empty() {
                    *html = body;
                }
            } else if mimetype.contains("text/plain") && plain.is_empty() {
                *plain = body;
            }
        }
        return;
    }
    for sub in &part.subparts {
        collect_bodies(sub, plain, html);
    }
}

/// Remove tags from an HTML body and decode common entities.
///
/// Script and style contents are dropped entirely. Closing block elements
/// become line breaks so sentence boundaries survive for keyword matching;
/// blank lines are collapsed away.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        let (before, tagged) = rest.split_at(open);
        text.push_str(before);

        let Some(close) = tagged.find('>') else {
            // Unterminated tag, drop the tail
            rest = "";
            break;
        };
        let tag = tagged[1..close].to_lowercase();
        rest = &tagged[close + 1..];

        if let Some(after) = skip_enclosed(&tag, rest) {
            rest = after;
        } else if is_block_break(&tag) {
            text.push('\n');
        }
    }
    text.push_str(rest);

    decode_entities(&text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Skip past the matching close tag for containers whose content is never
/// prose. Returns `None` for ordinary tags.
fn skip_enclosed<'a>(tag: &str, rest: &'a str) -> Option<&'a str> {
    let closer = if tag.starts_with("script") {
        "</script"
    } else if tag.starts_with("style") {
        "</style"
    } else {
        return None;
    };

    find_ignore_ascii_case(rest, closer).map_or(Some(""), |at| {
        let end = rest[at..]
            .find('>')
            .map_or(rest.len(), |gt| at + gt + 1);
        Some(&rest[end..])
    })
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn is_block_break(tag: &str) -> bool {
    tag.starts_with("br")
        || tag.starts_with("/p")
        || tag.starts_with("/div")
        || tag.starts_with("/li")
        || tag.starts_with("/h")
        || tag.starts_with("/tr")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
