//! Common error types for ucd2harness.

use std::path::PathBuf;
use thiserror::Error;

/// Common error type for ucd2harness operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid export document {path}: {reason}")]
    InvalidExport { path: PathBuf, reason: String },

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Document does not round-trip: {0}")]
    RoundTrip(String),

    #[error("Unknown deployment type: {0}")]
    UnknownDeploymentType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No input files found")]
    NoInputFiles,
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Write {
            path: PathBuf::from("out/x.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write out/x.yaml: denied");
        assert_eq!(
            Error::Config("bad".to_string()).to_string(),
            "Configuration error: bad"
        );
        assert_eq!(Error::NoInputFiles.to_string(), "No input files found");
    }
}
