//! Lazily compiled regular expressions for the fixed uri and query patterns.

/// Compile a literal pattern once and hand out a `&'static Regex` to it.
macro_rules! static_regex {
    ($pattern:literal) => {{
        static REGEX: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).expect("pattern is a valid regex"))
    }};
}
pub(crate) use static_regex;
