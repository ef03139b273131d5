//! Directive extraction.
//!
//! A directive is introduced by the first `?` in the query, optionally preceded
//! by whitespace, and runs to the next whitespace:
//!
//! ```text
//! "einstein ?W  relativity"
//!          ^^^^^^ match: leading ws + "?" + "W" + trailing ws
//!             ^   token (lower-cased to "w")
//! ```
//!
//! Only the first marker counts. Later `?` characters are ordinary query text.
//! `\s` / `\S` are Unicode-aware, so non-breaking and other exotic spaces act
//! as boundaries too.

use crate::{ParsedQuery, Range};

/// The first directive match in a raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DirectiveMatch<'a> {
    /// Span of the whole match, including surrounding whitespace.
    pub range: Range,
    /// Raw token text after the marker; empty for a bare `?`.
    pub token: &'a str,
}

/// Locate the first directive marker in `input`.
///
/// Shared by [`parse`] and the sanitizer so both agree on the boundary.
pub(crate) fn find_directive(input: &str) -> Option<DirectiveMatch<'_>> {
    let caps = regex!(r"\s*\?(\S*)\s*").captures(input)?;
    let whole = caps.get(0)?;
    let token = caps.get(1).map_or("", |m| m.as_str());

    Some(DirectiveMatch { range: Range { start: whole.start(), end: whole.end() }, token })
}

/// Classify `raw` by the directive it carries.
pub fn parse(raw: &str) -> ParsedQuery {
    let parsed = match find_directive(raw) {
        None => ParsedQuery::NoMarker,
        Some(m) if m.token.is_empty() => ParsedQuery::BareMarker,
        Some(m) => ParsedQuery::Directive(m.token.to_lowercase()),
    };

    log::debug!("[parse] query={raw:?} parsed={parsed:?}");
    parsed
}
