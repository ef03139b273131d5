//! URL building.
//!
//! The clean query is encoded as a URI component and dropped into the entry's
//! template at [`TEMPLATE_MARKER`]. Encoding follows the browser
//! `encodeURIComponent` rules, with one change: `/` stays literal, so path-like
//! queries (`rust-lang/rust`, `src/main.rs`) still work as paths on the
//! destination site.
//!
//! ```text
//! "a b/c (d)"  ──encode──▶  "a%20b%2Fc%20(d)"  ──restore /──▶  "a%20b/c%20(d)"
//! ```

use crate::{DirectiveEntry, TEMPLATE_MARKER};

/// Escapes that `urlencoding` emits but a URI component keeps literal,
/// plus `%2F`, which is restored on purpose.
///
/// `urlencoding` escapes everything outside `A-Za-z0-9-_.~` with upper-case
/// hex, and a literal `%` always becomes `%25`, so every `%` left in its output
/// starts a genuine escape and plain substring replacement is exact.
const KEEP_LITERAL: &[(&str, &str)] =
    &[("%2F", "/"), ("%21", "!"), ("%2A", "*"), ("%27", "'"), ("%28", "("), ("%29", ")")];

/// Percent-encode `text` as a URI component, leaving `/` intact.
pub(crate) fn encode_component(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escape, literal) in KEEP_LITERAL {
        if encoded.contains(escape) {
            encoded = encoded.replace(escape, literal);
        }
    }
    encoded
}

/// Instantiate `entry`'s template with `clean_query`.
///
/// Returns `None` for a missing entry or an empty resulting URL. Templates
/// without a marker are returned as-is.
pub fn build(entry: Option<&DirectiveEntry>, clean_query: &str) -> Option<String> {
    let entry = entry?;

    let url = if entry.is_static() {
        entry.url_template.clone()
    } else {
        entry.url_template.replacen(TEMPLATE_MARKER, &encode_component(clean_query), 1)
    };

    log::debug!("[build] token={:?} url={url:?}", entry.token);

    if url.is_empty() { None } else { Some(url) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_uri_component() {
        assert_eq!(encode_component("hello world"), "hello%20world");
        assert_eq!(encode_component("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(encode_component("c++"), "c%2B%2B");
        assert_eq!(encode_component("100%"), "100%25");
        assert_eq!(encode_component("it's (fine)!*~-_."), "it's%20(fine)!*~-_.");
    }

    #[test]
    fn keeps_slashes_literal() {
        assert_eq!(encode_component("path/to/file"), "path/to/file");
        assert_eq!(encode_component("a b/c"), "a%20b/c");
    }

    #[test]
    fn escaped_slash_in_input_is_not_decoded() {
        // A literal "%2F" typed by the user must survive as text, not turn into "/".
        assert_eq!(encode_component("%2F"), "%252F");
    }

    #[test]
    fn encodes_utf8_bytes() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("東京"), "%E6%9D%B1%E4%BA%AC");
    }

    #[test]
    fn substitutes_first_marker_only() {
        let entry = DirectiveEntry::new("x", "https://x.test/{{{s}}}?again={{{s}}}");
        assert_eq!(build(Some(&entry), "q").as_deref(), Some("https://x.test/q?again={{{s}}}"));
    }

    #[test]
    fn static_template_is_returned_verbatim() {
        let entry = DirectiveEntry::new("gm", "https://mail.google.com/");
        assert_eq!(build(Some(&entry), "ignored text").as_deref(), Some("https://mail.google.com/"));
    }

    #[test]
    fn missing_entry_or_empty_result_is_none() {
        assert_eq!(build(None, "anything"), None);

        let empty = DirectiveEntry::new("e", "");
        assert_eq!(build(Some(&empty), "anything"), None);

        let only_marker = DirectiveEntry::new("m", "{{{s}}}");
        assert_eq!(build(Some(&only_marker), ""), None);
    }

    #[test]
    fn empty_query_leaves_marker_slot_empty() {
        let entry = DirectiveEntry::new("w", "https://en.wikipedia.org/wiki/{{{s}}}");
        assert_eq!(build(Some(&entry), "").as_deref(), Some("https://en.wikipedia.org/wiki/"));
    }
}
