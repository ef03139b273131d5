//! Default-directive preferences.
//!
//! Two tokens steer queries that do not name a directive:
//!
//! | key                | fallback | used when                      |
//! |--------------------|----------|--------------------------------|
//! | `default-bang`     | `g`      | the query has no `?` at all    |
//! | `default-question` | `p`      | the query has a bare `?`       |
//!
//! Stores are read-only from this crate's point of view. Values are resolved
//! into a [`Defaults`] once by the caller and passed into every resolution, so
//! the engine itself never touches storage.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_BANG_KEY: &str = "default-bang";
pub const DEFAULT_QUESTION_KEY: &str = "default-question";
pub const FALLBACK_DEFAULT_BANG: &str = "g";
pub const FALLBACK_DEFAULT_QUESTION: &str = "p";

/// Read-only key/value source for preference strings.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
}

impl PreferenceStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// The two default directive tokens used by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Token used when the query has no marker.
    pub directive: String,
    /// Token used when the marker has no token after it.
    pub question_directive: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self::new(FALLBACK_DEFAULT_BANG, FALLBACK_DEFAULT_QUESTION)
    }
}

impl Defaults {
    pub fn new(directive: impl Into<String>, question_directive: impl Into<String>) -> Self {
        Self { directive: directive.into(), question_directive: question_directive.into() }
    }

    /// Read both tokens from `store`. Missing or blank values fall back to
    /// `g` / `p`; stored values are trimmed.
    pub fn from_store<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        Self::new(
            read_token(store, DEFAULT_BANG_KEY, FALLBACK_DEFAULT_BANG),
            read_token(store, DEFAULT_QUESTION_KEY, FALLBACK_DEFAULT_QUESTION),
        )
    }

    /// Replace individual tokens, e.g. from command-line flags. Blank overrides are ignored.
    pub fn with_overrides(mut self, directive: Option<&str>, question_directive: Option<&str>) -> Self {
        if let Some(token) = directive.map(str::trim).filter(|t| !t.is_empty()) {
            self.directive = token.to_string();
        }
        if let Some(token) = question_directive.map(str::trim).filter(|t| !t.is_empty()) {
            self.question_directive = token.to_string();
        }
        self
    }
}

fn read_token<S: PreferenceStore + ?Sized>(store: &S, key: &str, fallback: &str) -> String {
    match store.get(key) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => fallback.to_string(),
    }
}

// --- File-backed store -------------------------------------------------------

/// Preferences loaded from a TOML file with top-level string keys:
///
/// ```toml
/// default-bang = "ddg"
/// default-question = "w"
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilePreferences {
    values: HashMap<String, String>,
}

impl FilePreferences {
    /// Parse preferences from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let values: HashMap<String, String> = toml::from_str(text)?;
        Ok(Self { values })
    }

    /// Load preferences from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let prefs = Self::from_toml_str(&text)?;
        log::info!("loaded preferences from {}", path.display());
        Ok(prefs)
    }

    /// Load preferences from `path`, falling back to an empty store when the
    /// file is missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(err) if err.is_not_found() => {
                log::debug!("no preferences file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("ignoring preferences file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// `<config dir>/bangroute/preferences.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bangroute").join("preferences.toml"))
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_store_uses_fallbacks() {
        let defaults = Defaults::from_store(&HashMap::<String, String>::new());
        assert_eq!(defaults, Defaults::new("g", "p"));
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn stored_values_are_trimmed() {
        let defaults = Defaults::from_store(&store(&[(DEFAULT_BANG_KEY, "  ddg "), (DEFAULT_QUESTION_KEY, "w\n")]));
        assert_eq!(defaults, Defaults::new("ddg", "w"));
    }

    #[test]
    fn blank_values_fall_back() {
        let defaults = Defaults::from_store(&store(&[(DEFAULT_BANG_KEY, "   "), (DEFAULT_QUESTION_KEY, "")]));
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn overrides_replace_only_given_tokens() {
        let defaults = Defaults::default().with_overrides(Some(" w "), None);
        assert_eq!(defaults, Defaults::new("w", "p"));

        let defaults = Defaults::default().with_overrides(Some(""), Some("yt"));
        assert_eq!(defaults, Defaults::new("g", "yt"));
    }

    #[test]
    fn parses_toml_preferences() {
        let prefs = FilePreferences::from_toml_str("default-bang = \"ddg\"\ndefault-question = \"w\"\n").unwrap();
        assert_eq!(Defaults::from_store(&prefs), Defaults::new("ddg", "w"));
    }

    #[test]
    fn non_string_values_are_rejected() {
        let err = FilePreferences::from_toml_str("default-bang = 3\n").unwrap_err();
        assert!(matches!(err, Error::Preferences(_)));
    }

    #[test]
    fn load_or_default_tolerates_missing_and_broken_files() {
        let missing = FilePreferences::load_or_default("/definitely/not/here.toml");
        assert_eq!(Defaults::from_store(&missing), Defaults::default());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "default-bang = [").unwrap();
        let prefs = FilePreferences::load_or_default(broken.path());
        assert_eq!(Defaults::from_store(&prefs), Defaults::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default-question = \"gh\"").unwrap();
        let prefs = FilePreferences::load(file.path()).unwrap();
        assert_eq!(Defaults::from_store(&prefs), Defaults::new("g", "gh"));
    }
}
