/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// The pattern is a literal checked by the test suite, so a failed compile is
/// a programming error rather than a runtime condition.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
