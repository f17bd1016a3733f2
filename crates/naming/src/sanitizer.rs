//! Repair arbitrary strings into Harness identifiers and names.

use crate::patterns::{is_valid_identifier, is_valid_name, FORBIDDEN_NAME_CHARS};
use crate::{DEFAULT_IDENTIFIER, DEFAULT_NAME};
use std::collections::HashSet;
use tracing::trace;
use ucd2harness_common::MAX_IDENTIFIER_LEN;

/// Turn any string into a valid Harness identifier.
///
/// Valid identifiers are returned unchanged. Otherwise every character
/// outside `[A-Za-z0-9_]` becomes `_`, underscore runs collapse, leading and
/// trailing underscores are trimmed, and a leading digit gets a `_` prefix.
/// The same input always yields the same identifier, which is what lets a
/// stage reference the service generated for the same component.
pub fn sanitize_identifier(raw: &str) -> String {
    if is_valid_identifier(raw) {
        return raw.to_string();
    }

    let mut collapsed = String::with_capacity(raw.len());
    let mut last_was_separator = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            collapsed.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            collapsed.push('_');
            last_was_separator = true;
        }
    }

    let trimmed = collapsed.trim_matches('_');
    let mut identifier = if trimmed.is_empty() {
        DEFAULT_IDENTIFIER.to_string()
    } else {
        trimmed.to_string()
    };

    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    // ASCII only at this point, so byte truncation is char truncation
    identifier.truncate(MAX_IDENTIFIER_LEN);

    trace!("Repaired identifier {:?} -> {}", raw, identifier);
    identifier
}

/// Turn any string into a valid Harness name.
///
/// Valid names are returned unchanged. Otherwise `/ \ ( )` and every other
/// character Harness rejects become a space, whitespace runs collapse to a
/// single space, and the result is trimmed.
pub fn sanitize_name(raw: &str) -> String {
    if is_valid_name(raw) {
        return raw.to_string();
    }

    let mut name = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        let allowed = c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
        if allowed && !FORBIDDEN_NAME_CHARS.contains(&c) {
            if pending_space && !name.is_empty() {
                name.push(' ');
            }
            name.push(c);
            pending_space = false;
        } else {
            pending_space = true;
        }
    }

    if name.is_empty() {
        return DEFAULT_NAME.to_string();
    }

    name.truncate(MAX_IDENTIFIER_LEN);
    let name = name.trim_end().to_string();

    trace!("Repaired name {:?} -> {}", raw, name);
    name
}

/// Hands out identifiers that are unique within one scope.
///
/// A clash gets `_2`, `_3`, ... appended, shortening the base when needed to
/// stay within the length limit.
#[derive(Debug, Default)]
pub struct UniqueIdentifiers {
    taken: HashSet<String>,
}

impl UniqueIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base` (which must already be a valid identifier), or the first
    /// free suffixed variant of it.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 2usize;
        loop {
            let suffix = format!("_{}", n);
            let keep = MAX_IDENTIFIER_LEN.saturating_sub(suffix.len()).min(base.len());
            let candidate = format!("{}{}", &base[..keep], suffix);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_passthrough() {
        assert_eq!(sanitize_identifier("Orders_deploy"), "Orders_deploy");
        assert_eq!(sanitize_identifier("_private__x_"), "_private__x_");
    }

    #[test]
    fn test_identifier_repair() {
        assert_eq!(sanitize_identifier("order-service"), "order_service");
        assert_eq!(sanitize_identifier("My App_api"), "My_App_api");
        assert_eq!(sanitize_identifier("  spaced  out  "), "spaced_out");
        assert_eq!(sanitize_identifier("a -- b"), "a_b");
        assert_eq!(sanitize_identifier("Orders!_api"), "Orders_api");
        assert_eq!(sanitize_identifier("Zürich"), "Z_rich");
    }

    #[test]
    fn test_identifier_leading_digit() {
        assert_eq!(sanitize_identifier("9lives"), "_9lives");
        assert_eq!(sanitize_identifier("2024 release"), "_2024_release");
    }

    #[test]
    fn test_identifier_fallback() {
        assert_eq!(sanitize_identifier(""), "id");
        assert_eq!(sanitize_identifier("---"), "id");
        assert_eq!(sanitize_identifier("日本"), "id");
    }

    #[test]
    fn test_identifier_truncation() {
        let long = format!("{}-x", "a".repeat(200));
        let id = sanitize_identifier(&long);
        assert_eq!(id.len(), MAX_IDENTIFIER_LEN);
        assert!(is_valid_identifier(&id));

        let digits = "1".repeat(200);
        let id = sanitize_identifier(&digits);
        assert_eq!(id.len(), MAX_IDENTIFIER_LEN);
        assert!(id.starts_with('_'));
    }

    #[test]
    fn test_name_passthrough() {
        assert_eq!(sanitize_name("Orders - deploy"), "Orders - deploy");
        assert_eq!(sanitize_name("api.v2"), "api.v2");
    }

    #[test]
    fn test_name_repair() {
        assert_eq!(sanitize_name("api (v2)"), "api v2");
        assert_eq!(sanitize_name("billing/invoices"), "billing invoices");
        assert_eq!(sanitize_name(r"C:\deploy\iis"), "C deploy iis");
        assert_eq!(sanitize_name("  padded\t\tname  "), "padded name");
        assert_eq!(sanitize_name("Zürich"), "Z rich");
        assert_eq!(sanitize_name("api\u{3000}v2"), "api v2");
        assert_eq!(sanitize_name("api\u{2028}v2"), "api v2");
    }

    #[test]
    fn test_name_fallback() {
        assert_eq!(sanitize_name(""), "Name");
        assert_eq!(sanitize_name("()/\\"), "Name");
        assert_eq!(sanitize_name("   "), "Name");
    }

    #[test]
    fn test_name_truncation_does_not_end_in_space() {
        let long = format!("{} tail", "n".repeat(127));
        let name = sanitize_name(&format!("({})", long));
        assert!(name.chars().count() <= MAX_IDENTIFIER_LEN);
        assert!(!name.ends_with(' '));
        assert!(is_valid_name(&name));
    }

    #[test]
    fn test_unique_identifiers() {
        let mut ids = UniqueIdentifiers::new();
        assert_eq!(ids.claim("api"), "api");
        assert_eq!(ids.claim("api"), "api_2");
        assert_eq!(ids.claim("api"), "api_3");
        assert_eq!(ids.claim("worker"), "worker");
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_unique_identifiers_respect_length_limit() {
        let mut ids = UniqueIdentifiers::new();
        let base = "a".repeat(MAX_IDENTIFIER_LEN);
        ids.claim(&base);
        let second = ids.claim(&base);
        assert_eq!(second.len(), MAX_IDENTIFIER_LEN);
        assert!(second.ends_with("_2"));
        assert!(is_valid_identifier(&second));
    }

    proptest! {
        #[test]
        fn identifier_always_valid(raw in any::<String>()) {
            let id = sanitize_identifier(&raw);
            prop_assert!(is_valid_identifier(&id), "{:?} -> {:?}", raw, id);
            prop_assert!(id.chars().count() <= MAX_IDENTIFIER_LEN);
        }

        #[test]
        fn identifier_is_idempotent(raw in any::<String>()) {
            let once = sanitize_identifier(&raw);
            prop_assert_eq!(sanitize_identifier(&once), once);
        }

        #[test]
        fn valid_identifier_unchanged(raw in "[A-Za-z_][A-Za-z0-9_]{0,127}") {
            prop_assert_eq!(sanitize_identifier(&raw), raw);
        }

        #[test]
        fn name_always_valid(raw in any::<String>()) {
            let name = sanitize_name(&raw);
            prop_assert!(is_valid_name(&name), "{:?} -> {:?}", raw, name);
            prop_assert!(name.chars().count() <= MAX_IDENTIFIER_LEN);
            prop_assert!(!name.contains(FORBIDDEN_NAME_CHARS));
        }

        #[test]
        fn name_is_idempotent(raw in any::<String>()) {
            let once = sanitize_name(&raw);
            prop_assert_eq!(sanitize_name(&once), once);
        }
    }
}
