//! Input sanitization
//!
//! Turns untrusted request values into the two shapes the handlers embed in
//! pages or join onto the upload directory:
//! - [`SanitizedName`]: whitelisted, length-clamped, HTML-escaped display name
//! - [`SanitizedFilename`]: bare file name restricted to `[A-Za-z0-9._-]`

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Name shown when the raw value is absent or rejected
pub const DEFAULT_NAME: &str = "Guest";

/// Names are clamped to this many characters before validation
pub const MAX_NAME_CHARS: usize = 50;

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    // `\w` is Unicode-aware in the regex crate
    NAME_PATTERN.get_or_init(|| Regex::new(r"^[\w .'-]+$").expect("name pattern is valid"))
}

/// Display name that is safe to embed in HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName(String);

impl SanitizedName {
    /// Sanitize an optional raw `name` value
    ///
    /// Trims whitespace, keeps the first 50 characters, and falls back to
    /// `Guest` when the result does not match `^[\w .'-]+$`.
    pub fn new(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self(DEFAULT_NAME.to_string());
        };

        let trimmed = raw.trim();
        let clamped: String = trimmed.chars().take(MAX_NAME_CHARS).collect();

        if name_pattern().is_match(&clamped) {
            Self(escape_html(&clamped))
        } else {
            Self(DEFAULT_NAME.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name confined to a single path component of safe characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    /// Reduce a raw filename to its basename and strip every character
    /// outside `[A-Za-z0-9._-]`
    ///
    /// Returns `None` when nothing usable is left, including the `.` and
    /// `..` directory entries.
    pub fn new(raw: &str) -> Option<Self> {
        let basename = raw.rsplit('/').next().unwrap_or_default();

        let filtered: String = basename
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .collect();

        match filtered.as_str() {
            "" | "." | ".." => None,
            _ => Some(Self(filtered)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape the HTML special characters `& < > " '`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
