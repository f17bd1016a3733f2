//! Deployment type classification.
//!
//! A keyword heuristic over the application name, the component name and
//! their tags. Categories are checked in a fixed order and the first one
//! with a matching keyword wins, so a component tagged both `iis` and `pcf`
//! is WinRm.

use tracing::debug;
use ucd2harness_common::DeploymentType;
use ucd2harness_naming::TagSet;

/// Keyword categories, in priority order.
pub const KEYWORD_TABLE: &[(DeploymentType, &[&str])] = &[
    (
        DeploymentType::WinRm,
        &[
            "windows",
            "iis",
            "msi",
            "dcom",
            "app pool",
            "app_pool",
            "powershell",
        ],
    ),
    (
        DeploymentType::Tas,
        &["pcf", "tanzu", "cloud foundry", "cloudfoundry", "tas"],
    ),
    (
        DeploymentType::Kubernetes,
        &["kubernetes", "k8s", "helm", "openshift"],
    ),
    (
        DeploymentType::Ssh,
        &["informatica", "linux", "unix", "ssh"],
    ),
];

/// Result of classifying one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub deployment_type: DeploymentType,
    /// Keyword that decided the type; `None` means the fallback was used.
    pub keyword: Option<&'static str>,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.keyword.is_none()
    }
}

/// Lowercased text the classifier searches.
///
/// Holds the application name, the component name, every tag key and value,
/// and the raw tag strings.
pub fn classification_text(app_name: &str, component_name: &str, tags: &TagSet) -> String {
    let mut parts: Vec<&str> = vec![app_name, component_name];
    for (key, value) in tags.map() {
        parts.push(key);
        parts.push(value);
    }
    parts.extend(tags.flat().iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

/// Classify already lowercased text.
pub fn classify_text(text: &str, fallback: DeploymentType) -> Classification {
    for (deployment_type, keywords) in KEYWORD_TABLE {
        if let Some(keyword) = keywords.iter().find(|k| text.contains(*k)) {
            return Classification {
                deployment_type: *deployment_type,
                keyword: Some(keyword),
            };
        }
    }

    Classification {
        deployment_type: fallback,
        keyword: None,
    }
}

/// Classify one component of an application.
pub fn classify_component(
    app_name: &str,
    component_name: &str,
    tags: &TagSet,
    fallback: DeploymentType,
) -> Classification {
    let text = classification_text(app_name, component_name, tags);
    let classification = classify_text(&text, fallback);

    match classification.keyword {
        Some(keyword) => debug!(
            "{} / {}: {} (keyword '{}')",
            app_name, component_name, classification.deployment_type, keyword
        ),
        None => debug!(
            "{} / {}: no keyword, using {}",
            app_name, component_name, classification.deployment_type
        ),
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(app: &str, comp: &str, tags: &[&str]) -> Classification {
        classify_component(app, comp, &TagSet::parse(tags.iter().copied()), DeploymentType::Ssh)
    }

    #[test]
    fn test_windows_keywords() {
        assert_eq!(classify("Shop", "web", &["IIS"]).deployment_type, DeploymentType::WinRm);
        assert_eq!(
            classify("Shop", "Default App Pool", &[]).deployment_type,
            DeploymentType::WinRm
        );
        assert_eq!(
            classify("Shop", "installer", &["platform:Windows"]).deployment_type,
            DeploymentType::WinRm
        );
    }

    #[test]
    fn test_tas_keyword() {
        let c = classify("Orders", "api", &["pcf"]);
        assert_eq!(c.deployment_type, DeploymentType::Tas);
        assert_eq!(c.keyword, Some("pcf"));
    }

    #[test]
    fn test_kubernetes_keyword() {
        assert_eq!(
            classify("Orders", "chart", &["deploy:helm"]).deployment_type,
            DeploymentType::Kubernetes
        );
        assert_eq!(
            classify("Orders K8S", "api", &[]).deployment_type,
            DeploymentType::Kubernetes
        );
    }

    #[test]
    fn test_ssh_keyword() {
        let c = classify("Warehouse", "etl", &["informatica"]);
        assert_eq!(c.deployment_type, DeploymentType::Ssh);
        assert!(!c.is_fallback());
    }

    #[test]
    fn test_priority_order() {
        // Windows is checked before TAS
        let c = classify("Orders", "api", &["pcf", "iis"]);
        assert_eq!(c.deployment_type, DeploymentType::WinRm);
        assert_eq!(c.keyword, Some("iis"));
    }

    #[test]
    fn test_fallback() {
        let c = classify("Orders", "worker", &["env:prod"]);
        assert!(c.is_fallback());
        assert_eq!(c.deployment_type, DeploymentType::Ssh);

        let c = classify_component(
            "Orders",
            "worker",
            &TagSet::new(),
            DeploymentType::Kubernetes,
        );
        assert_eq!(c.deployment_type, DeploymentType::Kubernetes);
    }

    #[test]
    fn test_component_classified_independently() {
        let app_tags = TagSet::parse(["team:payments"]);
        let api = app_tags.merged(&TagSet::parse(["pcf"]));
        let web = app_tags.merged(&TagSet::parse(["iis"]));

        assert_eq!(
            classify_component("Orders", "api", &api, DeploymentType::Ssh).deployment_type,
            DeploymentType::Tas
        );
        assert_eq!(
            classify_component("Orders", "web", &web, DeploymentType::Ssh).deployment_type,
            DeploymentType::WinRm
        );
    }

    #[test]
    fn test_text_includes_keys_values_and_raw() {
        let tags = TagSet::parse(["Platform:Linux", "smoke"]);
        let text = classification_text("App", "Comp", &tags);
        assert!(text.contains("platform"));
        assert!(text.contains("linux"));
        assert!(text.contains("platform:linux"));
        assert_eq!(text, text.to_lowercase());
    }
}
