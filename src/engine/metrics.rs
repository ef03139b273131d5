//! Engine run output and timings.
//!
//! Every run is timed; the numbers are cheap to collect (a handful of
//! `Instant::now` calls) and only surface through
//! [`crate::resolve_verbose_with`] and the CLI's `--explain` report.

use super::SelectionRule;
use crate::{DirectiveEntry, ParsedQuery};
use std::time::Duration;

/// Wall-clock time spent in each pipeline stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    pub parse: Duration,
    pub select: Duration,
    pub sanitize: Duration,
    pub build: Duration,
    /// Whole run, including the gaps between stages.
    pub total: Duration,
}

/// Everything one engine run produced, borrowed from the catalog it ran against.
#[derive(Debug, Clone)]
pub struct RunResult<'c> {
    pub parsed: ParsedQuery,
    pub rule: SelectionRule,
    pub entry: Option<&'c DirectiveEntry>,
    pub clean_query: String,
    pub url: Option<String>,
    pub timings: StageTimings,
}
