//! Directive selection.
//!
//! Maps a [`ParsedQuery`] to a catalog entry. Each parse outcome has exactly
//! one lookup:
//!
//! ```text
//! ParsedQuery ──┬─ BareMarker      -> catalog[defaults.question_directive]
//!               ├─ Directive(tok)  -> catalog[tok]     (no fallback)
//!               └─ NoMarker        -> catalog[defaults.directive]
//! ```
//!
//! An unknown explicit token does *not* fall back to a default: the caller
//! asked for something specific, so the result is absent.

use crate::{Catalog, Defaults, DirectiveEntry, ParsedQuery};
use std::fmt;

/// Which branch of the selection policy produced the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    /// `?` with no token: the default question directive.
    QuestionDefault,
    /// `?token`: the token itself.
    Explicit,
    /// No `?` at all: the default directive.
    Default,
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionRule::QuestionDefault => "question-default",
            SelectionRule::Explicit => "explicit",
            SelectionRule::Default => "default",
        };
        f.write_str(name)
    }
}

/// Pick the catalog entry for `parsed`.
///
/// Returns `None` when the relevant token (explicit or default) is not in
/// the catalog.
pub fn select<'c>(parsed: &ParsedQuery, catalog: &'c Catalog, defaults: &Defaults) -> Option<&'c DirectiveEntry> {
    select_with_rule(parsed, catalog, defaults).1
}

pub(crate) fn select_with_rule<'c>(
    parsed: &ParsedQuery,
    catalog: &'c Catalog,
    defaults: &Defaults,
) -> (SelectionRule, Option<&'c DirectiveEntry>) {
    let (rule, token) = match parsed {
        ParsedQuery::BareMarker => (SelectionRule::QuestionDefault, defaults.question_directive.as_str()),
        ParsedQuery::Directive(token) => (SelectionRule::Explicit, token.as_str()),
        ParsedQuery::NoMarker => (SelectionRule::Default, defaults.directive.as_str()),
    };

    let entry = catalog.get(token);
    log::debug!("[select] rule={rule} token={token:?} found={}", entry.is_some());

    (rule, entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            DirectiveEntry::new("g", "https://google.com/search?q={{{s}}}"),
            DirectiveEntry::new("p", "https://www.perplexity.ai/search?q={{{s}}}"),
            DirectiveEntry::new("w", "https://en.wikipedia.org/wiki/{{{s}}}"),
        ])
    }

    #[test]
    fn no_marker_uses_default_directive() {
        let catalog = catalog();
        let (rule, entry) = select_with_rule(&ParsedQuery::NoMarker, &catalog, &Defaults::default());
        assert_eq!(rule, SelectionRule::Default);
        assert_eq!(entry.unwrap().token, "g");
    }

    #[test]
    fn bare_marker_uses_question_directive() {
        let catalog = catalog();
        let (rule, entry) = select_with_rule(&ParsedQuery::BareMarker, &catalog, &Defaults::default());
        assert_eq!(rule, SelectionRule::QuestionDefault);
        assert_eq!(entry.unwrap().token, "p");
    }

    #[test]
    fn explicit_token_is_looked_up_case_insensitively() {
        let catalog = catalog();
        let parsed = ParsedQuery::Directive("W".to_string());
        assert_eq!(select(&parsed, &catalog, &Defaults::default()).unwrap().token, "w");
    }

    #[test]
    fn unknown_explicit_token_does_not_fall_back() {
        let catalog = catalog();
        let parsed = ParsedQuery::Directive("zzz".to_string());
        assert!(select(&parsed, &catalog, &Defaults::default()).is_none());
    }

    #[test]
    fn custom_defaults_are_honoured() {
        let catalog = catalog();
        let defaults = Defaults::new("w", "g");
        assert_eq!(select(&ParsedQuery::NoMarker, &catalog, &defaults).unwrap().token, "w");
        assert_eq!(select(&ParsedQuery::BareMarker, &catalog, &defaults).unwrap().token, "g");
    }

    #[test]
    fn unknown_default_selects_nothing() {
        let catalog = catalog();
        let defaults = Defaults::new("nope", "nada");
        assert!(select(&ParsedQuery::NoMarker, &catalog, &defaults).is_none());
        assert!(select(&ParsedQuery::BareMarker, &catalog, &defaults).is_none());
    }

    #[test]
    fn rule_names_are_stable() {
        assert_eq!(SelectionRule::QuestionDefault.to_string(), "question-default");
        assert_eq!(SelectionRule::Explicit.to_string(), "explicit");
        assert_eq!(SelectionRule::Default.to_string(), "default");
    }
}
