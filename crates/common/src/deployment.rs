//! Harness deployment type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution target technology of a deployment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentType {
    /// Windows remoting (IIS, MSI, app pools).
    WinRm,
    /// Tanzu Application Service / Cloud Foundry.
    #[serde(rename = "TAS")]
    Tas,
    /// Remote shell on Linux/Unix hosts.
    Ssh,
    Kubernetes,
    CustomDeployment,
}

impl DeploymentType {
    /// All deployment types, in schema order.
    pub const ALL: [DeploymentType; 5] = [
        DeploymentType::WinRm,
        DeploymentType::Tas,
        DeploymentType::Ssh,
        DeploymentType::Kubernetes,
        DeploymentType::CustomDeployment,
    ];

    /// Name as it appears in Harness YAML.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::WinRm => "WinRm",
            DeploymentType::Tas => "TAS",
            DeploymentType::Ssh => "Ssh",
            DeploymentType::Kubernetes => "Kubernetes",
            DeploymentType::CustomDeployment => "CustomDeployment",
        }
    }

    /// Check if stages of this type run PowerShell.
    pub fn is_windows(&self) -> bool {
        matches!(self, DeploymentType::WinRm)
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winrm" => Ok(DeploymentType::WinRm),
            "tas" | "pcf" | "cf" | "tanzu" => Ok(DeploymentType::Tas),
            "ssh" => Ok(DeploymentType::Ssh),
            "kubernetes" | "k8s" => Ok(DeploymentType::Kubernetes),
            "customdeployment" | "custom" => Ok(DeploymentType::CustomDeployment),
            _ => Err(crate::Error::UnknownDeploymentType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deployment_type() {
        assert_eq!(DeploymentType::from_str("winrm").unwrap(), DeploymentType::WinRm);
        assert_eq!(DeploymentType::from_str("WinRm").unwrap(), DeploymentType::WinRm);
        assert_eq!(DeploymentType::from_str("TAS").unwrap(), DeploymentType::Tas);
        assert_eq!(DeploymentType::from_str("tanzu").unwrap(), DeploymentType::Tas);
        assert_eq!(DeploymentType::from_str("k8s").unwrap(), DeploymentType::Kubernetes);
        assert_eq!(
            DeploymentType::from_str("custom").unwrap(),
            DeploymentType::CustomDeployment
        );
        assert!(DeploymentType::from_str("mainframe").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for ty in DeploymentType::ALL {
            assert_eq!(DeploymentType::from_str(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&DeploymentType::Tas).unwrap(), "\"TAS\"");
        assert_eq!(serde_json::to_string(&DeploymentType::WinRm).unwrap(), "\"WinRm\"");
    }
}
