//! Harness document types - output of the converter.
//!
//! Field order matches the order Harness itself writes, so generated files
//! diff cleanly against ones exported from the Harness UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ucd2harness_common::DeploymentType;

/// `service:` document written to `.harness/services/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDocument {
    pub service: Service,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub identifier: String,
    pub org_identifier: String,
    pub project_identifier: String,
    pub tags: BTreeMap<String, String>,
    pub service_definition: ServiceDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(rename = "type")]
    pub deployment_type: DeploymentType,
    /// Left empty; artifacts and manifests are configured in Harness.
    pub spec: BTreeMap<String, String>,
}

/// `pipeline:` document written to `.harness/pipelines/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    pub pipeline: Pipeline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub name: String,
    pub identifier: String,
    pub org_identifier: String,
    pub project_identifier: String,
    pub tags: BTreeMap<String, String>,
    pub stages: Vec<StageElement>,
}

/// Wrapper producing the `- stage: {...}` list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageElement {
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub identifier: String,
    /// Always `Deployment`.
    #[serde(rename = "type")]
    pub stage_type: String,
    pub spec: StageSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSpec {
    pub deployment_type: DeploymentType,
    pub service: ServiceRef,
    pub environment: EnvironmentSpec,
    pub execution: ExecutionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRef {
    pub service_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSpec {
    pub environment_ref: String,
    pub infrastructure_definitions: Vec<InfrastructureRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureRef {
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSpec {
    pub steps: Vec<ExecutionElement>,
}

/// Entry of an execution step list.
///
/// Untagged so each entry serializes as a plain `stepGroup:` or `step:` map
/// rather than a YAML-tagged enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionElement {
    StepGroup {
        #[serde(rename = "stepGroup")]
        step_group: StepGroup,
    },
    Step {
        step: DeployStep,
    },
}

/// Step group backed by a registry template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepGroup {
    pub name: String,
    pub identifier: String,
    pub template: StepGroupTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepGroupTemplate {
    pub template_ref: String,
    pub version_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_inputs: Option<TemplateInputs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInputs {
    pub variables: Vec<TemplateVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    pub value: VariableValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableType {
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Number(serde_yaml::Number),
    Text(String),
}

impl VariableValue {
    pub fn variable_type(&self) -> VariableType {
        match self {
            VariableValue::Number(_) => VariableType::Number,
            VariableValue::Text(_) => VariableType::String,
        }
    }
}

/// Placeholder `ShellScript` step that ends every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployStep {
    pub name: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub spec: ShellScriptSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellScriptSpec {
    pub shell: String,
    pub on_delegate: bool,
    pub source: ScriptSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub spec: InlineScript,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineScript {
    pub script: String,
}

impl PipelineDocument {
    /// Stage identifiers in pipeline order.
    pub fn stage_identifiers(&self) -> Vec<&str> {
        self.pipeline
            .stages
            .iter()
            .map(|s| s.stage.identifier.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pipeline() -> PipelineDocument {
        let step_group = ExecutionElement::StepGroup {
            step_group: StepGroup {
                name: "Java Gradle Build".to_string(),
                identifier: "Java_Gradle_Build_Invocation".to_string(),
                template: StepGroupTemplate {
                    template_ref: "Java_Gradle_Build".to_string(),
                    version_label: "v1".to_string(),
                    template_inputs: Some(TemplateInputs {
                        variables: vec![
                            TemplateVariable {
                                name: "gradleTasks".to_string(),
                                variable_type: VariableType::String,
                                value: VariableValue::Text("clean build".to_string()),
                            },
                            TemplateVariable {
                                name: "retries".to_string(),
                                variable_type: VariableType::Number,
                                value: VariableValue::Number(3.into()),
                            },
                        ],
                    }),
                },
            },
        };
        let deploy = ExecutionElement::Step {
            step: DeployStep {
                name: "Deploy".to_string(),
                identifier: "Deploy".to_string(),
                step_type: "ShellScript".to_string(),
                spec: ShellScriptSpec {
                    shell: "Bash".to_string(),
                    on_delegate: true,
                    source: ScriptSource {
                        source_type: "Inline".to_string(),
                        spec: InlineScript {
                            script: "echo deploy".to_string(),
                        },
                    },
                },
            },
        };

        PipelineDocument {
            pipeline: Pipeline {
                name: "Orders - deploy".to_string(),
                identifier: "Orders_deploy".to_string(),
                org_identifier: "default".to_string(),
                project_identifier: "payments".to_string(),
                tags: BTreeMap::from([("env".to_string(), "true".to_string())]),
                stages: vec![StageElement {
                    stage: Stage {
                        name: "api".to_string(),
                        identifier: "api".to_string(),
                        stage_type: "Deployment".to_string(),
                        spec: StageSpec {
                            deployment_type: DeploymentType::Tas,
                            service: ServiceRef {
                                service_ref: "Orders_api".to_string(),
                            },
                            environment: EnvironmentSpec {
                                environment_ref: crate::RUNTIME_INPUT.to_string(),
                                infrastructure_definitions: vec![InfrastructureRef {
                                    identifier: crate::RUNTIME_INPUT.to_string(),
                                }],
                            },
                            execution: ExecutionSpec {
                                steps: vec![step_group, deploy],
                            },
                        },
                    },
                }],
            },
        }
    }

    #[test]
    fn test_pipeline_yaml_shape() {
        let yaml = serde_yaml::to_string(&sample_pipeline()).unwrap();

        assert!(yaml.starts_with("pipeline:\n  name: "));
        assert!(yaml.contains("identifier: Orders_deploy"));
        assert!(yaml.contains("orgIdentifier: default"));
        assert!(yaml.contains("deploymentType: TAS"));
        assert!(yaml.contains("serviceRef: Orders_api"));
        assert!(yaml.contains("- stepGroup:"));
        assert!(yaml.contains("- step:"));
        assert!(yaml.contains("onDelegate: true"));
        // String tag values stay strings.
        assert!(yaml.contains("env: 'true'"));
        // Untagged enums never produce YAML tags.
        assert!(!yaml.contains('!'));
    }

    #[test]
    fn test_pipeline_yaml_round_trip() {
        let pipeline = sample_pipeline();
        let yaml = serde_yaml::to_string(&pipeline).unwrap();
        let parsed: PipelineDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, pipeline);
        assert_eq!(parsed.stage_identifiers(), ["api"]);
    }

    #[test]
    fn test_template_inputs_omitted_when_absent() {
        let template = StepGroupTemplate {
            template_ref: "Ref".to_string(),
            version_label: "v1".to_string(),
            template_inputs: None,
        };
        let yaml = serde_yaml::to_string(&template).unwrap();
        assert!(!yaml.contains("templateInputs"));
    }

    #[test]
    fn test_service_definition_spec_is_empty_map() {
        let doc = ServiceDocument {
            service: Service {
                name: "api".to_string(),
                identifier: "Orders_api".to_string(),
                org_identifier: "default".to_string(),
                project_identifier: "payments".to_string(),
                tags: BTreeMap::new(),
                service_definition: ServiceDefinition {
                    deployment_type: DeploymentType::Ssh,
                    spec: BTreeMap::new(),
                },
            },
        };
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert!(yaml.contains("spec: {}"));
        assert!(yaml.contains("type: Ssh"));
        let parsed: ServiceDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, doc);
    }
}
