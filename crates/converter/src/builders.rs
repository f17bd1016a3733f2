//! Harness document construction.

use serde_yaml::Value;
use std::collections::BTreeMap;
use ucd2harness_common::DeploymentType;
use ucd2harness_naming::{sanitize_identifier, sanitize_name, TagSet, UniqueIdentifiers};
use ucd2harness_schema::{
    DeployStep, EnvironmentSpec, ExecutionElement, ExecutionSpec, InfrastructureRef, InlineScript,
    MatchRule, Pipeline, PipelineDocument, ScriptSource, Service, ServiceDefinition,
    ServiceDocument, ServiceRef, ShellScriptSpec, Stage, StageElement, StageSpec, StepGroup,
    StepGroupTemplate, TemplateInputs, TemplateVariable, VariableValue, RUNTIME_INPUT,
};

pub const STAGE_TYPE: &str = "Deployment";
pub const DEPLOY_STEP_IDENTIFIER: &str = "Deploy";

/// Organization and project every document is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub org_identifier: String,
    pub project_identifier: String,
}

impl Scope {
    /// Both identifiers are sanitized.
    pub fn new(org: &str, project: &str) -> Self {
        Self {
            org_identifier: sanitize_identifier(org),
            project_identifier: sanitize_identifier(project),
        }
    }
}

/// Base service identifier for a component: `<app>_<component>`.
pub fn service_identifier(app_name: &str, component_name: &str) -> String {
    sanitize_identifier(&format!("{}_{}", app_name, component_name))
}

pub fn pipeline_identifier(app_name: &str) -> String {
    sanitize_identifier(&format!("{}_deploy", app_name))
}

pub fn pipeline_name(app_name: &str) -> String {
    sanitize_name(&format!("{} - deploy", app_name))
}

/// Service for one component. Tags are the component's own.
pub fn build_service(
    identifier: &str,
    component_name: &str,
    scope: &Scope,
    component_tags: &TagSet,
    deployment_type: DeploymentType,
) -> ServiceDocument {
    ServiceDocument {
        service: Service {
            name: sanitize_name(component_name),
            identifier: identifier.to_string(),
            org_identifier: scope.org_identifier.clone(),
            project_identifier: scope.project_identifier.clone(),
            tags: component_tags.map().clone(),
            service_definition: ServiceDefinition {
                deployment_type,
                spec: BTreeMap::new(),
            },
        },
    }
}

/// Step group for a matched rule; `None` when the rule has no template.
pub fn build_step_group(rule: &MatchRule) -> Option<StepGroup> {
    let template_ref = rule.template_ref.as_deref()?.trim();
    if template_ref.is_empty() {
        return None;
    }
    let display = rule.display_name().unwrap_or(template_ref);

    let variables: Vec<TemplateVariable> = rule
        .inputs
        .variables
        .iter()
        .map(|(name, value)| {
            let value = variable_value(value);
            TemplateVariable {
                name: scalar_text(name),
                variable_type: value.variable_type(),
                value,
            }
        })
        .collect();

    Some(StepGroup {
        name: sanitize_name(display),
        identifier: sanitize_identifier(&format!("{}_Invocation", display)),
        template: StepGroupTemplate {
            template_ref: template_ref.to_string(),
            version_label: rule.version_label().to_string(),
            template_inputs: (!variables.is_empty()).then_some(TemplateInputs { variables }),
        },
    })
}

/// Placeholder deploy step; PowerShell on Windows targets, Bash elsewhere.
pub fn build_deploy_step(component_name: &str, deployment_type: DeploymentType) -> DeployStep {
    let component = sanitize_name(component_name);
    let (shell, script) = if deployment_type.is_windows() {
        (
            "PowerShell",
            format!(
                "Write-Host \"Deploying {}: replace with the UCD process steps\"",
                component
            ),
        )
    } else {
        (
            "Bash",
            format!(
                "echo \"Deploying {}: replace with the UCD process steps\"",
                component
            ),
        )
    };

    DeployStep {
        name: DEPLOY_STEP_IDENTIFIER.to_string(),
        identifier: DEPLOY_STEP_IDENTIFIER.to_string(),
        step_type: "ShellScript".to_string(),
        spec: ShellScriptSpec {
            shell: shell.to_string(),
            on_delegate: true,
            source: ScriptSource {
                source_type: "Inline".to_string(),
                spec: InlineScript { script },
            },
        },
    }
}

/// Deployment stage for one component.
///
/// Step groups come first, in the order given, followed by the deploy step.
/// Step group identifiers that clash get a numeric suffix.
pub fn build_stage(
    stage_identifier: &str,
    component_name: &str,
    service_ref: &str,
    deployment_type: DeploymentType,
    step_groups: Vec<StepGroup>,
) -> StageElement {
    let mut ids = UniqueIdentifiers::new();
    ids.claim(DEPLOY_STEP_IDENTIFIER);

    let mut steps: Vec<ExecutionElement> = step_groups
        .into_iter()
        .map(|mut group| {
            group.identifier = ids.claim(&group.identifier);
            ExecutionElement::StepGroup { step_group: group }
        })
        .collect();
    steps.push(ExecutionElement::Step {
        step: build_deploy_step(component_name, deployment_type),
    });

    StageElement {
        stage: Stage {
            name: sanitize_name(component_name),
            identifier: stage_identifier.to_string(),
            stage_type: STAGE_TYPE.to_string(),
            spec: StageSpec {
                deployment_type,
                service: ServiceRef {
                    service_ref: service_ref.to_string(),
                },
                environment: EnvironmentSpec {
                    environment_ref: RUNTIME_INPUT.to_string(),
                    infrastructure_definitions: vec![InfrastructureRef {
                        identifier: RUNTIME_INPUT.to_string(),
                    }],
                },
                execution: ExecutionSpec { steps },
            },
        },
    }
}

/// Pipeline for one application. Tags are the application's own.
pub fn build_pipeline(
    app_name: &str,
    scope: &Scope,
    app_tags: &TagSet,
    stages: Vec<StageElement>,
) -> PipelineDocument {
    PipelineDocument {
        pipeline: Pipeline {
            name: pipeline_name(app_name),
            identifier: pipeline_identifier(app_name),
            org_identifier: scope.org_identifier.clone(),
            project_identifier: scope.project_identifier.clone(),
            tags: app_tags.map().clone(),
            stages,
        },
    }
}

fn variable_value(value: &Value) -> VariableValue {
    match value {
        Value::Number(n) if n.as_f64().map_or(true, f64::is_finite) => {
            VariableValue::Number(n.clone())
        }
        Value::Tagged(tagged) => variable_value(&tagged.value),
        other => VariableValue::Text(scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}
