//! Template registry types.
//!
//! A registry maps UCD names and tags to reusable Harness step-group
//! templates. It is usually kept at `.harness/template-registry.yaml`.

use serde::{Deserialize, Serialize};

/// Registry file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Rules, evaluated in file order.
    #[serde(default)]
    pub templates: Vec<MatchRule>,
}

/// A single template rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRule {
    pub name: Option<String>,
    pub template_ref: Option<String>,
    pub version_label: Option<String>,
    /// Harness template type; informational, only step groups are injected.
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    #[serde(default, rename = "match")]
    pub match_clauses: MatchClauses,
    #[serde(default)]
    pub inputs: RuleInputs,
}

/// Match clauses of a rule. An absent or empty list always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchClauses {
    #[serde(default)]
    pub tags_any: Vec<String>,
    #[serde(default)]
    pub tags_all: Vec<String>,
    #[serde(default)]
    pub any_regex: Vec<String>,
    #[serde(default)]
    pub all_regex: Vec<String>,
}

/// Values surfaced as template inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleInputs {
    /// Variable name to value, in registry order.
    #[serde(default)]
    pub variables: serde_yaml::Mapping,
}

impl MatchRule {
    /// Version label, defaulting to `v1`.
    pub fn version_label(&self) -> &str {
        self.version_label.as_deref().unwrap_or("v1")
    }

    /// Display name, defaulting to the template reference.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.template_ref.as_deref())
    }
}

impl Registry {
    /// Parse a registry from YAML (JSON is accepted as well).
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes as null.
        let registry: Option<Registry> = serde_yaml::from_str(content)?;
        Ok(registry.unwrap_or_default())
    }

    /// Registry used when none is configured: a single Java/Gradle rule.
    pub fn builtin() -> Self {
        let mut variables = serde_yaml::Mapping::new();
        variables.insert("workingDir".into(), ".".into());
        variables.insert("gradleTasks".into(), "clean build".into());
        variables.insert("extraArgs".into(), "".into());
        variables.insert("javaHome".into(), "".into());

        Registry {
            templates: vec![MatchRule {
                name: Some("Java Gradle Build".to_string()),
                template_ref: Some("Java_Gradle_Build".to_string()),
                version_label: Some("v1".to_string()),
                template_type: Some("StepGroup".to_string()),
                match_clauses: MatchClauses {
                    any_regex: vec![
                        r"\bgradle\b".to_string(),
                        r"\bjava\b".to_string(),
                        r"\.jar\b".to_string(),
                        r"\.war\b".to_string(),
                    ],
                    ..Default::default()
                },
                inputs: RuleInputs { variables },
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
