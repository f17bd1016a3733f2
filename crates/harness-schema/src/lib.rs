//! Document schema definitions for ucd2harness.
//!
//! This crate defines the UrbanCode Deploy export consumed by the converter,
//! the template registry format, and the Harness service and pipeline
//! documents it produces.

pub mod documents;
pub mod export;
pub mod registry;
pub mod schema;
pub mod validation;

pub use documents::{
    DeployStep, EnvironmentSpec, ExecutionElement, ExecutionSpec, InfrastructureRef, InlineScript,
    Pipeline, PipelineDocument, ScriptSource, Service, ServiceDefinition, ServiceDocument,
    ServiceRef, ShellScriptSpec, Stage, StageElement, StageSpec, StepGroup, StepGroupTemplate,
    TemplateInputs, TemplateVariable, VariableType, VariableValue,
};
pub use export::{ApplicationEntry, ApplicationInfo, ComponentInfo, ExportDocument, RawTag};
pub use registry::{MatchClauses, MatchRule, Registry, RuleInputs};
pub use validation::{validate_pipeline, validate_service, ValidationError, ValidationResult};

/// Placeholder Harness resolves at pipeline run time.
pub const RUNTIME_INPUT: &str = "<+input>";
