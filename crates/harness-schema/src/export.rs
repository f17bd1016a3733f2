//! UrbanCode Deploy export types - input of the converter.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Exported applications, in export order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub applications: Vec<ApplicationEntry>,
}

/// One application together with its components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub application: ApplicationInfo,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub components: Vec<ComponentInfo>,
}

/// Application header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<RawTag>,
}

/// A deployable component of an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<RawTag>,
}

/// A tag as exported by UCD.
///
/// UCD writes tag objects (`{"name": "env:prod", "color": ...}`); hand-edited
/// exports often use bare strings instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTag {
    Bare(String),
    Named { name: Option<String> },
}

impl RawTag {
    /// Tag text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawTag::Bare(s) => Some(s.as_str()),
            RawTag::Named { name } => name.as_deref(),
        }
    }
}

impl ApplicationInfo {
    /// Application name, defaulting like UCD's own UI does.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Application")
    }

    /// Tag strings in export order.
    pub fn tag_texts(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(RawTag::text)
    }
}

impl ComponentInfo {
    /// Component name, defaulting when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Component")
    }

    /// Tag strings in export order.
    pub fn tag_texts(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(RawTag::text)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ucd_export() {
        let json = r##"{
            "applications": [{
                "application": {
                    "name": "Orders",
                    "tags": [{"name": "env:prod", "color": "#00B2EF"}]
                },
                "components": [
                    {"name": "api", "tags": [{"name": "java:8"}]},
                    {"name": "worker"}
                ]
            }]
        }"##;

        let doc: ExportDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.applications.len(), 1);

        let entry = &doc.applications[0];
        assert_eq!(entry.application.display_name(), "Orders");
        assert_eq!(entry.application.tag_texts().collect::<Vec<_>>(), ["env:prod"]);
        assert_eq!(entry.components.len(), 2);
        assert_eq!(entry.components[0].tag_texts().collect::<Vec<_>>(), ["java:8"]);
        assert!(entry.components[1].tags.is_empty());
    }

    #[test]
    fn test_bare_string_tags_and_nulls() {
        let json = r#"{
            "applications": [{
                "application": {"name": null, "tags": ["smoke", {"name": null}]},
                "components": null
            }]
        }"#;

        let doc: ExportDocument = serde_json::from_str(json).unwrap();
        let entry = &doc.applications[0];
        assert_eq!(entry.application.display_name(), "Application");
        assert_eq!(entry.application.tag_texts().collect::<Vec<_>>(), ["smoke"]);
        assert!(entry.components.is_empty());
    }

    #[test]
    fn test_missing_applications_is_empty() {
        let doc: ExportDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.applications.is_empty());

        let doc: ExportDocument = serde_json::from_str(r#"{"applications": null}"#).unwrap();
        assert!(doc.applications.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<ExportDocument>(r#"{"applications": 3}"#).is_err());
    }
}
