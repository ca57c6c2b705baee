//! Splitting of parameter strings into argument tokens.

use std::sync::LazyLock;

use regex::Regex;

/// A `(...)`, `[...]` or `"..."` group, or else a run of non-whitespace.
///
/// Groups are matched lazily up to the first closing delimiter, so nesting
/// is not supported and quotes have no escape sequences.
#[allow(clippy::expect_used)]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(.*?\)|\[.*?\]|".*?"|\S+"#).expect("token pattern is a valid regex")
});

/// Splits a parameter string into argument tokens, left to right.
///
/// Grouping delimiters are kept in the tokens:
/// `hello (1,2,3) "a b" 4.5` yields `hello`, `(1,2,3)`, `"a b"` and `4.5`.
pub fn tokenize(params: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(params)
        .map(|found| found.as_str().to_string())
        .collect()
}
