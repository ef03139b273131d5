//! Bang-style query routing.
//!
//! A raw search query may carry a *directive* ("bang"): a `?` followed by a
//! short token, e.g. `"?w albert einstein"`. Resolution picks a URL template
//! from a [`Catalog`], strips the directive from the query and substitutes the
//! encoded remainder into the template:
//!
//! ```text
//! "?w albert einstein"
//!      │ parse      -> ParsedQuery::Directive("w")
//!      │ select     -> { t: "w", u: "https://en.wikipedia.org/wiki/{{{s}}}" }
//!      │ sanitize   -> "albert einstein"
//!      └ build      -> "https://en.wikipedia.org/wiki/albert%20einstein"
//! ```
//!
//! The entry point is [`resolve`] (or [`resolve_with`] when the default
//! directives come from a [`PreferenceStore`]).

use serde::{Deserialize, Serialize};

#[macro_use]
mod macros;
mod api;
mod catalog;
mod engine;
mod error;
mod preferences;

pub use api::{
    Resolution, ResolutionReport, query_from_url, resolve, resolve_verbose_with, resolve_with, search_template,
};
pub use catalog::Catalog;
pub use engine::{SelectionRule, StageTimings, build, parse, sanitize, select};
pub use error::{Error, Result};
pub use preferences::{
    DEFAULT_BANG_KEY, DEFAULT_QUESTION_KEY, Defaults, FALLBACK_DEFAULT_BANG, FALLBACK_DEFAULT_QUESTION,
    FilePreferences, PreferenceStore,
};

/// Placeholder inside a URL template that receives the encoded query.
pub const TEMPLATE_MARKER: &str = "{{{s}}}";

// --- Catalog records ---------------------------------------------------------

/// One catalog record: a directive token and the URL template it selects.
///
/// Serialized in the compact field names used by published bang lists
/// (`t`, `u`, `s`, ...); the long names are accepted on input as well.
/// Only `token` and `url_template` take part in resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveEntry {
    #[serde(rename = "t", alias = "token")]
    pub token: String,
    /// Template with zero or one [`TEMPLATE_MARKER`].
    #[serde(rename = "u", alias = "url_template", alias = "url")]
    pub url_template: String,
    /// Human readable site name.
    #[serde(rename = "s", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "d", alias = "domain", default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "c", alias = "category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "sc", alias = "subcategory", default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(rename = "r", alias = "relevance", default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u64>,
}

impl DirectiveEntry {
    /// Create an entry with no descriptive metadata.
    pub fn new(token: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            url_template: url_template.into(),
            name: None,
            domain: None,
            category: None,
            subcategory: None,
            relevance: None,
        }
    }

    /// A static entry ignores the query and always redirects to its template.
    pub fn is_static(&self) -> bool {
        !self.url_template.contains(TEMPLATE_MARKER)
    }
}

// --- Parse results -----------------------------------------------------------

/// What the parser found in a raw query.
///
/// The three variants map one-to-one onto the selection policy in
/// [`select`], so a `match` over them is exhaustive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedQuery {
    /// No `?` anywhere in the query.
    NoMarker,
    /// A `?` followed by whitespace or end of input.
    BareMarker,
    /// A `?` followed by a token (lower-cased, never empty).
    Directive(String),
}

impl ParsedQuery {
    pub fn has_directive_marker(&self) -> bool {
        !matches!(self, ParsedQuery::NoMarker)
    }

    /// The directive token, if a non-empty one followed the marker.
    pub fn directive_token(&self) -> Option<&str> {
        match self {
            ParsedQuery::Directive(token) => Some(token),
            _ => None,
        }
    }
}

/// Byte span in the raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}
