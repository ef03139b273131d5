//! Error types.
//!
//! Resolving a query never fails: every outcome is a [`crate::Resolution`]
//! variant. Errors only come from the edges, i.e. loading a catalog or a
//! preferences file and parsing a request URL.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog or preferences file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog data is not a JSON array of directive records.
    #[error("invalid catalog data: {0}")]
    CatalogJson(#[from] serde_json::Error),

    /// Preferences file is not valid TOML (or has non-string values).
    #[error("invalid preferences file: {0}")]
    Preferences(#[from] toml::de::Error),

    /// A request URL handed to [`crate::query_from_url`] did not parse.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// True when the error is a missing file rather than a malformed one.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
