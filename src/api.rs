use crate::engine::{self, SelectionRule, StageTimings};
use crate::{Catalog, Defaults, DirectiveEntry, ParsedQuery, Result};

/// Outcome of resolving one query.
///
/// `NoQuery` and `NoMatchingDirective` are both "don't redirect", but callers
/// usually react differently (show a home page vs. report an unknown bang),
/// so they are kept apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Send the user here.
    Redirect(String),
    /// The query was empty or whitespace.
    NoQuery,
    /// The selected token (explicit or default) is not in the catalog.
    NoMatchingDirective,
}

impl Resolution {
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Resolution::Redirect(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect(_))
    }

    fn from_url(url: Option<String>) -> Self {
        url.map_or(Resolution::NoMatchingDirective, Resolution::Redirect)
    }
}

/// Resolve `raw_query` against `catalog`.
///
/// `default_directive` is used when the query has no `?`;
/// `default_question_directive` when it has a `?` with nothing after it.
///
/// # Example
/// ```
/// use bangroute::{Catalog, DirectiveEntry, Resolution, resolve};
///
/// let catalog = Catalog::new(vec![
///     DirectiveEntry::new("g", "https://google.com/search?q={{{s}}}"),
///     DirectiveEntry::new("w", "https://en.wikipedia.org/wiki/{{{s}}}"),
/// ]);
///
/// assert_eq!(
///     resolve("?w albert einstein", &catalog, "g", "p"),
///     Resolution::Redirect("https://en.wikipedia.org/wiki/albert%20einstein".to_string()),
/// );
/// assert_eq!(resolve("   ", &catalog, "g", "p"), Resolution::NoQuery);
/// ```
pub fn resolve(
    raw_query: &str,
    catalog: &Catalog,
    default_directive: &str,
    default_question_directive: &str,
) -> Resolution {
    resolve_with(raw_query, catalog, &Defaults::new(default_directive, default_question_directive))
}

/// Resolve `raw_query` with the default tokens bundled in `defaults`.
pub fn resolve_with(raw_query: &str, catalog: &Catalog, defaults: &Defaults) -> Resolution {
    let query = raw_query.trim();
    if query.is_empty() {
        return Resolution::NoQuery;
    }

    Resolution::from_url(engine::run(query, catalog, defaults).url)
}

/// Verbose resolution output: the outcome plus every intermediate value.
///
/// All the optional fields are `None` when the query was empty, since no
/// stage ran.
#[derive(Debug, Clone)]
pub struct ResolutionReport {
    /// The trimmed query.
    pub query: String,
    pub resolution: Resolution,
    pub parsed: Option<ParsedQuery>,
    pub rule: Option<SelectionRule>,
    /// Token the selector looked up.
    pub looked_up: Option<String>,
    pub entry: Option<DirectiveEntry>,
    pub clean_query: Option<String>,
    pub timings: StageTimings,
}

/// Resolve `raw_query` and keep the intermediate values and stage timings.
///
/// The [`Resolution`] is identical to what [`resolve_with`] returns.
pub fn resolve_verbose_with(raw_query: &str, catalog: &Catalog, defaults: &Defaults) -> ResolutionReport {
    let query = raw_query.trim();
    if query.is_empty() {
        return ResolutionReport {
            query: String::new(),
            resolution: Resolution::NoQuery,
            parsed: None,
            rule: None,
            looked_up: None,
            entry: None,
            clean_query: None,
            timings: StageTimings::default(),
        };
    }

    let run = engine::run(query, catalog, defaults);
    let looked_up = match (&run.parsed, run.rule) {
        (ParsedQuery::Directive(token), _) => token.clone(),
        (_, SelectionRule::QuestionDefault) => defaults.question_directive.clone(),
        _ => defaults.directive.clone(),
    };

    ResolutionReport {
        query: query.to_string(),
        resolution: Resolution::from_url(run.url),
        parsed: Some(run.parsed),
        rule: Some(run.rule),
        looked_up: Some(looked_up),
        entry: run.entry.cloned(),
        clean_query: Some(run.clean_query),
        timings: run.timings,
    }
}

/// Pull the raw query out of a request URL's `q` parameter.
///
/// Returns `Ok(None)` when the parameter is missing or blank, which callers
/// treat like [`Resolution::NoQuery`].
pub fn query_from_url(request_url: &str) -> Result<Option<String>> {
    let url = url::Url::parse(request_url)?;
    let query = url
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());
    Ok(query)
}

/// The search-engine URL to register in a browser for a deployment at `origin`.
///
/// Browsers substitute the typed query for `%s`.
pub fn search_template(origin: &str) -> String {
    format!("{}/?q=%s", origin.trim_end_matches('/'))
}
