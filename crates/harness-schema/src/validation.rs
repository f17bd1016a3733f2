//! Generated document validation.

use crate::schema;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error type.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema validation failed: {0}")]
    SchemaError(String),

    #[error("Duplicate stage identifier: {0}")]
    DuplicateStage(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result of document validation.
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// All errors joined into one line, for logs and error messages.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_against(schema_value: &Value, document: &Value) -> Result<ValidationResult, ValidationError> {
    let mut result = ValidationResult::new();

    let compiled = JSONSchema::compile(schema_value)
        .map_err(|e| ValidationError::SchemaError(e.to_string()))?;

    let validation = compiled.validate(document);
    if let Err(errors) = validation {
        for error in errors {
            result.add_error(ValidationError::SchemaError(format!(
                "{} at {}",
                error, error.instance_path
            )));
        }
    }

    Ok(result)
}

/// Validate a service document against the service schema.
pub fn validate_service(service: &Value) -> Result<ValidationResult, ValidationError> {
    let mut result = validate_against(&schema::service_schema(), service)?;

    if let Some(tags) = service.pointer("/service/tags").and_then(|t| t.as_object()) {
        if tags.is_empty() {
            result.add_warning("service has no tags".to_string());
        }
    }

    Ok(result)
}

/// Validate a pipeline document against the pipeline schema.
pub fn validate_pipeline(pipeline: &Value) -> Result<ValidationResult, ValidationError> {
    let mut result = validate_against(&schema::pipeline_schema(), pipeline)?;

    // Stage identifiers must be unique within a pipeline
    if let Some(stages) = pipeline.pointer("/pipeline/stages").and_then(|s| s.as_array()) {
        let mut seen = HashSet::new();
        for stage in stages {
            if let Some(id) = stage.pointer("/stage/identifier").and_then(|i| i.as_str()) {
                if !seen.insert(id) {
                    result.add_error(ValidationError::DuplicateStage(id.to_string()));
                }
            }
        }
    }

    Ok(result)
}
