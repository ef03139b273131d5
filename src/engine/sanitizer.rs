//! Query sanitizing: strip the directive, keep the search text.

use super::parser::find_directive;

/// Remove the first directive (marker, token and surrounding whitespace) from
/// `raw` and trim the remainder.
///
/// ```text
/// "einstein ?w relativity"  -> "einstein relativity"
/// "?w albert einstein"      -> "albert einstein"
/// "why is the sky blue ?"   -> "why is the sky blue"
/// "a ?w b ?c"               -> "a b ?c"
/// ```
///
/// Text on both sides of a mid-query directive is joined with one space.
pub fn sanitize(raw: &str) -> String {
    let Some(m) = find_directive(raw) else {
        return raw.trim().to_string();
    };

    let before = raw[..m.range.start].trim();
    let after = raw[m.range.end..].trim();

    let clean = match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        (false, false) => format!("{before} {after}"),
    };

    log::debug!("[sanitize] query={raw:?} clean={clean:?}");
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_marker_only_trims() {
        assert_eq!(sanitize("  hello world \t"), "hello world");
        assert_eq!(sanitize("path/to/file"), "path/to/file");
    }

    #[test]
    fn strips_leading_directive() {
        assert_eq!(sanitize("?w albert einstein"), "albert einstein");
        assert_eq!(sanitize("  ?W   albert einstein  "), "albert einstein");
    }

    #[test]
    fn strips_trailing_directive() {
        assert_eq!(sanitize("albert einstein ?w"), "albert einstein");
        assert_eq!(sanitize("foo ?"), "foo");
        assert_eq!(sanitize("foo ? "), "foo");
    }

    #[test]
    fn mid_query_directive_leaves_single_space() {
        assert_eq!(sanitize("einstein ?w relativity"), "einstein relativity");
        assert_eq!(sanitize("einstein   ?w\t\trelativity"), "einstein relativity");
    }

    #[test]
    fn later_markers_are_kept() {
        assert_eq!(sanitize("a ?w b ?c"), "a b ?c");
        assert_eq!(sanitize("what ? is this?"), "what is this?");
    }

    #[test]
    fn directive_only_yields_empty_query() {
        assert_eq!(sanitize("?w"), "");
        assert_eq!(sanitize("?"), "");
    }
}
