//! Converter configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use ucd2harness_common::{DeploymentType, Error};

/// How generated documents are split into output directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStrategy {
    /// Everything under `<out>/.harness`.
    #[default]
    None,
    /// One `<out>/<input file stem>/.harness` per input file.
    File,
    /// One `<out>/<application>/.harness` per application.
    Application,
}

impl fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingStrategy::None => write!(f, "none"),
            GroupingStrategy::File => write!(f, "file"),
            GroupingStrategy::Application => write!(f, "application"),
        }
    }
}

impl FromStr for GroupingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(GroupingStrategy::None),
            "file" => Ok(GroupingStrategy::File),
            "application" | "app" => Ok(GroupingStrategy::Application),
            _ => Err(Error::Config(format!(
                "unknown grouping strategy '{}' (expected file, application or none)",
                s
            ))),
        }
    }
}

/// Which registry rules contribute step groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every matching rule, in registry order.
    #[default]
    All,
    /// Only the first matching rule.
    FirstMatch,
}

/// Serialization format of generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!(
                "unknown output format '{}' (expected yaml or json)",
                s
            ))),
        }
    }
}

/// Configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Output root directory.
    pub out_dir: PathBuf,
    /// Harness organization identifier.
    pub org_identifier: String,
    /// Harness project identifier.
    pub project_identifier: String,
    /// Template registry file; `None` uses the default lookup.
    pub registry_path: Option<PathBuf>,
    pub grouping: GroupingStrategy,
    pub match_mode: MatchMode,
    pub format: OutputFormat,
    /// Deployment type used when no classifier keyword matches.
    pub fallback_type: DeploymentType,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("harness_out"),
            org_identifier: "default".to_string(),
            project_identifier: "default_project".to_string(),
            registry_path: None,
            grouping: GroupingStrategy::None,
            match_mode: MatchMode::All,
            format: OutputFormat::Yaml,
            fallback_type: DeploymentType::Ssh,
        }
    }
}
