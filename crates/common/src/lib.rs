//! Common utilities and types shared across ucd2harness crates.

pub mod deployment;
pub mod error;
pub mod hash;

pub use deployment::DeploymentType;
pub use error::{Error, Result};

/// Maximum length of a Harness identifier or name.
pub const MAX_IDENTIFIER_LEN: usize = 128;
