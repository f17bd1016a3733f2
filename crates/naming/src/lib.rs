//! Identifier, name and tag normalization for ucd2harness.
//!
//! UCD allows almost anything in application, component and tag names.
//! Harness does not, so every string that ends up in an `identifier` or
//! `name` field passes through this crate first.

pub mod patterns;
pub mod sanitizer;
pub mod tags;

pub use sanitizer::{sanitize_identifier, sanitize_name, UniqueIdentifiers};
pub use tags::{split_tag, TagSet};

/// Fallback when nothing usable is left of an identifier.
pub const DEFAULT_IDENTIFIER: &str = "id";

/// Fallback when nothing usable is left of a name.
pub const DEFAULT_NAME: &str = "Name";
