//! Rendering, validation and writing of generated documents.

use crate::config::OutputFormat;
use crate::report::{DocumentKind, WrittenDocument};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use ucd2harness_common::hash::{sha256_str, short_digest};
use ucd2harness_common::{Error, Result};
use ucd2harness_schema::{
    validate_pipeline, validate_service, PipelineDocument, ServiceDocument, ValidationResult,
};

/// `.harness` tree under one group root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(group_root: &Path) -> Self {
        Self {
            root: group_root.join(".harness"),
        }
    }

    pub fn service_path(&self, identifier: &str, format: OutputFormat) -> PathBuf {
        self.root
            .join("services")
            .join(format!("{}.{}", identifier, format.extension()))
    }

    pub fn pipeline_path(&self, identifier: &str, format: OutputFormat) -> PathBuf {
        self.root
            .join("pipelines")
            .join(format!("{}.{}", identifier, format.extension()))
    }
}

/// Serialize a document and check it reads back unchanged.
pub fn render<T>(document: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let content = match format {
        OutputFormat::Yaml => serde_yaml::to_string(document)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(document)?;
            json.push('\n');
            json
        }
    };

    let parsed: T = match format {
        OutputFormat::Yaml => serde_yaml::from_str(&content)?,
        OutputFormat::Json => serde_json::from_str(&content)?,
    };
    if parsed != *document {
        return Err(Error::RoundTrip(format!(
            "{} output differs after reading it back",
            format
        )));
    }

    Ok(content)
}

/// Render a service document after checking it against the service schema.
pub fn render_service(document: &ServiceDocument, format: OutputFormat) -> Result<String> {
    let value = serde_json::to_value(document)?;
    let result = validate_service(&value).map_err(|e| Error::SchemaValidation(e.to_string()))?;
    check(&document.service.identifier, result)?;
    render(document, format)
}

/// Render a pipeline document after checking it against the pipeline schema.
pub fn render_pipeline(document: &PipelineDocument, format: OutputFormat) -> Result<String> {
    let value = serde_json::to_value(document)?;
    let result = validate_pipeline(&value).map_err(|e| Error::SchemaValidation(e.to_string()))?;
    check(&document.pipeline.identifier, result)?;
    render(document, format)
}

fn check(identifier: &str, result: ValidationResult) -> Result<()> {
    for warning in &result.warnings {
        debug!("{}: {}", identifier, warning);
    }
    if result.valid {
        Ok(())
    } else {
        Err(Error::SchemaValidation(format!(
            "{}: {}",
            identifier,
            result.error_summary()
        )))
    }
}

/// Writes documents and remembers what this run has written.
#[derive(Debug, Default)]
pub struct DocumentWriter {
    written: Vec<WrittenDocument>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to `path`, creating parent directories.
    ///
    /// Existing files are overwritten. Overwriting a file written earlier in
    /// the same run is reported, since it means two inputs mapped to the
    /// same identifier.
    pub fn write(
        &mut self,
        kind: DocumentKind,
        identifier: &str,
        path: PathBuf,
        content: &str,
    ) -> Result<&WrittenDocument> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, content).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

        let sha256 = sha256_str(content);
        debug!("Wrote {} ({})", path.display(), short_digest(&sha256));

        let document = WrittenDocument {
            kind,
            identifier: identifier.to_string(),
            path,
            sha256,
        };

        match self.written.iter().position(|d| d.path == document.path) {
            Some(index) => {
                warn!(
                    "{} was already written in this run and has been overwritten",
                    document.path.display()
                );
                self.written[index] = document;
                Ok(&self.written[index])
            }
            None => {
                self.written.push(document);
                Ok(&self.written[self.written.len() - 1])
            }
        }
    }

    pub fn documents(&self) -> &[WrittenDocument] {
        &self.written
    }

    pub fn into_documents(self) -> Vec<WrittenDocument> {
        self.written
    }
}
