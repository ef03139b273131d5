//! Resolution engine.
//!
//! Resolving a query is a short, fixed pipeline. Each stage is a pure function
//! over strings and lives in its own submodule:
//!
//! ```text
//! raw query ──┬─ parse     (parser.rs)    -> ParsedQuery
//!             │     │
//!             │     v
//!             │  select    (selector.rs)  -> Option<&DirectiveEntry>
//!             │     │                          (catalog + Defaults)
//!             │     v
//!             └─ sanitize  (sanitizer.rs) -> clean query
//!                   │
//!                   v
//!                build     (builder.rs)   -> Option<String>
//! ```
//!
//! `parse` and `sanitize` run independently over the same raw text, but both
//! go through `parser::find_directive`, so the token the selector sees and the
//! text the sanitizer removes always come from the same match.
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: locates the first `?` marker and classifies the query.
//! - `selector.rs`: the three-way fallback policy (bare marker / explicit
//!   directive / no marker).
//! - `sanitizer.rs`: strips the marker and directive token from the query.
//! - `builder.rs`: URI-component encoding and template substitution.
//! - `metrics.rs`: per-stage timings for verbose runs.
//!
//! ## Debugging
//!
//! Every stage logs at `debug` level; run the CLI with `RUST_LOG=debug` to
//! trace a resolution.

#[path = "engine/builder.rs"]
mod builder;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/sanitizer.rs"]
mod sanitizer;
#[path = "engine/selector.rs"]
mod selector;


pub use builder::build;
pub use metrics::{RunResult, StageTimings};
pub use parser::parse;
pub use sanitizer::sanitize;
pub use selector::{SelectionRule, select};

use crate::{Catalog, Defaults};
use std::time::Instant;

/// Run every stage over an already-trimmed, non-empty `query`, timing each one.
///
/// ```text
/// run() -> parse -> select -> sanitize -> build
///            └────── StageTimings ──────────┘
/// ```
pub(crate) fn run<'c>(query: &str, catalog: &'c Catalog, defaults: &Defaults) -> RunResult<'c> {
    let started = Instant::now();
    let mut timings = StageTimings::default();

    let t = Instant::now();
    let parsed = parse(query);
    timings.parse = t.elapsed();

    let t = Instant::now();
    let (rule, entry) = selector::select_with_rule(&parsed, catalog, defaults);
    timings.select = t.elapsed();

    let t = Instant::now();
    let clean_query = sanitize(query);
    timings.sanitize = t.elapsed();

    let t = Instant::now();
    let url = build(entry, &clean_query);
    timings.build = t.elapsed();

    timings.total = started.elapsed();

    RunResult { parsed, rule, entry, clean_query, url, timings }
}
