//! Directive catalog.
//!
//! The catalog is static data: an ordered list of [`DirectiveEntry`] records,
//! either the bundled `data/bangs.json` or a JSON file supplied by the caller.
//! It is indexed once by lower-cased token and never mutated afterwards, so a
//! single instance can be shared freely across threads.
//!
//! ## Duplicates
//!
//! Tokens should be unique. When they are not, the *first* entry for a token
//! wins the index; later ones stay visible through [`Catalog::iter`] but are
//! unreachable by lookup, and a warning is logged for each.

use crate::{DirectiveEntry, Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_JSON: &str = include_str!("../data/bangs.json");

static BUNDLED: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json_str(BUNDLED_JSON).unwrap_or_else(|err| {
        log::error!("bundled catalog is unreadable, continuing with an empty one: {err}");
        Catalog::default()
    })
});

/// Immutable token -> template lookup table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<DirectiveEntry>,
    /// Lower-cased token -> index into `entries`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Index `entries`, keeping their order.
    pub fn new(entries: Vec<DirectiveEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            let key = entry.token.to_lowercase();
            if let Some(&first) = index.get(&key) {
                log::warn!(
                    "duplicate directive token {:?} at position {idx}; keeping the entry at position {first}",
                    entry.token
                );
                continue;
            }
            index.insert(key, idx);
        }

        Catalog { entries, index }
    }

    /// Parse a JSON array of directive records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<DirectiveEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a JSON catalog from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let catalog = Self::from_json_str(&json)?;
        log::info!("loaded {} directives from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog shipped with the crate, parsed on first use.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED
    }

    /// Case-insensitive exact lookup.
    pub fn get(&self, token: &str) -> Option<&DirectiveEntry> {
        let idx = if token.chars().any(char::is_uppercase) {
            self.index.get(&token.to_lowercase())
        } else {
            self.index.get(token)
        };
        idx.map(|&i| &self.entries[i])
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, DirectiveEntry> {
        self.entries.iter()
    }
}

impl FromIterator<DirectiveEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = DirectiveEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DirectiveEntry;
    type IntoIter = std::slice::Iter<'a, DirectiveEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lookup_ignores_case_on_both_sides() {
        let catalog = Catalog::new(vec![DirectiveEntry::new("GH", "https://github.com/search?q={{{s}}}")]);
        assert_eq!(catalog.get("gh").unwrap().token, "GH");
        assert_eq!(catalog.get("Gh").unwrap().token, "GH");
        assert!(catalog.get("g").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let catalog = Catalog::new(vec![
            DirectiveEntry::new("g", "https://first.test/{{{s}}}"),
            DirectiveEntry::new("G", "https://second.test/{{{s}}}"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("g").unwrap().url_template, "https://first.test/{{{s}}}");
    }

    #[test]
    fn parses_compact_and_long_field_names() {
        let json = r#"[
            {"t": "w", "u": "https://en.wikipedia.org/wiki/{{{s}}}", "s": "Wikipedia", "r": 1200},
            {"token": "gh", "url_template": "https://github.com/search?q={{{s}}}", "category": "Tech"}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();

        let w = catalog.get("w").unwrap();
        assert_eq!(w.name.as_deref(), Some("Wikipedia"));
        assert_eq!(w.relevance, Some(1200));

        let gh = catalog.get("gh").unwrap();
        assert_eq!(gh.category.as_deref(), Some("Tech"));
        assert_eq!(gh.name, None);
    }

    #[test]
    fn rejects_records_without_template() {
        let err = Catalog::from_json_str(r#"[{"t": "w"}]"#).unwrap_err();
        assert!(matches!(err, Error::CatalogJson(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"t": "ddg", "u": "https://duckduckgo.com/?q={{{{{{s}}}}}}"}}]"#).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.get("ddg").unwrap().url_template, "https://duckduckgo.com/?q={{{s}}}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn bundled_catalog_has_the_fallback_defaults() {
        let catalog = Catalog::bundled();
        assert!(!catalog.is_empty());
        assert!(catalog.contains(crate::FALLBACK_DEFAULT_BANG));
        assert!(catalog.contains(crate::FALLBACK_DEFAULT_QUESTION));
        assert_eq!(catalog.iter().count(), catalog.len());
    }

    #[test]
    fn bundled_catalog_templates_are_well_formed() {
        for entry in Catalog::bundled() {
            assert!(!entry.token.is_empty(), "empty token in bundled catalog");
            assert!(entry.url_template.matches(crate::TEMPLATE_MARKER).count() <= 1, "{}", entry.token);
            assert!(entry.url_template.starts_with("https://"), "{}", entry.token);
        }
    }

    #[test]
    fn bundled_tokens_are_unique() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.index.len(), catalog.len());
    }
}
