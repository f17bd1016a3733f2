//! Harness identifier and name grammars.

use regex::Regex;
use std::sync::LazyLock;

/// Harness identifier: letter or underscore, then up to 127 word characters.
pub static IDENTIFIER_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,127}$").unwrap());

/// Harness name: no `/ \ ( )`, no leading whitespace, at most 128 characters.
///
/// Whitespace is spelled out as ASCII; `\s` would also admit Unicode spaces
/// that the document schema rejects.
pub static NAME_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_0-9\-.][-0-9A-Za-z_ \t\n\r\x0B\x0C.]{0,127}$").unwrap()
});

/// Characters Harness rejects in names even though UCD exports them often.
pub const FORBIDDEN_NAME_CHARS: [char; 4] = ['/', '\\', '(', ')'];

/// Check if a string is a valid Harness identifier.
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_GRAMMAR.is_match(s)
}

/// Check if a string is a valid Harness name.
pub fn is_valid_name(s: &str) -> bool {
    NAME_GRAMMAR.is_match(s)
}
