//! JSON schema definitions for generated document validation.
//!
//! These cover only what the converter guarantees: identifier and name
//! grammar, required structure, and the deployment type enum. They are not
//! a substitute for Harness's own schema.

/// Identifier grammar shared by every `identifier`/`*Ref` field.
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]{0,127}$";

/// Name grammar shared by every `name` field. Whitespace is ASCII only.
pub const NAME_PATTERN: &str = r"^[A-Za-z_0-9\-.][-0-9A-Za-z_ \t\n\r\x0B\x0C.]{0,127}$";

/// JSON Schema for service documents.
pub const SERVICE_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Harness Service (converter subset)",
  "type": "object",
  "required": ["service"],
  "properties": {
    "service": {
      "type": "object",
      "required": ["name", "identifier", "orgIdentifier", "projectIdentifier", "tags", "serviceDefinition"],
      "properties": {
        "name": { "$ref": "#/definitions/name" },
        "identifier": { "$ref": "#/definitions/identifier" },
        "orgIdentifier": { "$ref": "#/definitions/identifier" },
        "projectIdentifier": { "$ref": "#/definitions/identifier" },
        "tags": {
          "type": "object",
          "additionalProperties": { "type": "string" }
        },
        "serviceDefinition": {
          "type": "object",
          "required": ["type", "spec"],
          "properties": {
            "type": { "$ref": "#/definitions/deploymentType" },
            "spec": { "type": "object" }
          }
        }
      }
    }
  },
  "definitions": {
    "identifier": { "type": "string", "pattern": "^[A-Za-z_][A-Za-z0-9_]{0,127}$" },
    "name": { "type": "string", "pattern": "^[A-Za-z_0-9\\-.][-0-9A-Za-z_ \\t\\n\\r\\x0B\\x0C.]{0,127}$" },
    "deploymentType": { "type": "string", "enum": ["WinRm", "TAS", "Ssh", "Kubernetes", "CustomDeployment"] }
  }
}"##;

/// JSON Schema for pipeline documents.
pub const PIPELINE_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Harness Pipeline (converter subset)",
  "type": "object",
  "required": ["pipeline"],
  "properties": {
    "pipeline": {
      "type": "object",
      "required": ["name", "identifier", "orgIdentifier", "projectIdentifier", "tags", "stages"],
      "properties": {
        "name": { "$ref": "#/definitions/name" },
        "identifier": { "$ref": "#/definitions/identifier" },
        "orgIdentifier": { "$ref": "#/definitions/identifier" },
        "projectIdentifier": { "$ref": "#/definitions/identifier" },
        "tags": {
          "type": "object",
          "additionalProperties": { "type": "string" }
        },
        "stages": {
          "type": "array",
          "minItems": 1,
          "items": {
            "type": "object",
            "required": ["stage"],
            "properties": {
              "stage": {
                "type": "object",
                "required": ["name", "identifier", "type", "spec"],
                "properties": {
                  "name": { "$ref": "#/definitions/name" },
                  "identifier": { "$ref": "#/definitions/identifier" },
                  "type": { "const": "Deployment" },
                  "spec": {
                    "type": "object",
                    "required": ["deploymentType", "service", "environment", "execution"],
                    "properties": {
                      "deploymentType": { "$ref": "#/definitions/deploymentType" },
                      "service": {
                        "type": "object",
                        "required": ["serviceRef"],
                        "properties": { "serviceRef": { "$ref": "#/definitions/identifier" } }
                      },
                      "execution": {
                        "type": "object",
                        "required": ["steps"],
                        "properties": {
                          "steps": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                              "type": "object",
                              "oneOf": [
                                { "required": ["stepGroup"], "properties": { "stepGroup": { "$ref": "#/definitions/element" } } },
                                { "required": ["step"], "properties": { "step": { "$ref": "#/definitions/element" } } }
                              ]
                            }
                          }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  },
  "definitions": {
    "identifier": { "type": "string", "pattern": "^[A-Za-z_][A-Za-z0-9_]{0,127}$" },
    "name": { "type": "string", "pattern": "^[A-Za-z_0-9\\-.][-0-9A-Za-z_ \\t\\n\\r\\x0B\\x0C.]{0,127}$" },
    "deploymentType": { "type": "string", "enum": ["WinRm", "TAS", "Ssh", "Kubernetes", "CustomDeployment"] },
    "element": {
      "type": "object",
      "required": ["name", "identifier"],
      "properties": {
        "name": { "$ref": "#/definitions/name" },
        "identifier": { "$ref": "#/definitions/identifier" }
      }
    }
  }
}"##;

/// Get the service schema as a parsed JSON value.
pub fn service_schema() -> serde_json::Value {
    serde_json::from_str(SERVICE_SCHEMA).expect("Invalid service schema")
}

/// Get the pipeline schema as a parsed JSON value.
pub fn pipeline_schema() -> serde_json::Value {
    serde_json::from_str(PIPELINE_SCHEMA).expect("Invalid pipeline schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucd2harness_common::DeploymentType;

    #[test]
    fn test_schemas_parse() {
        assert_eq!(service_schema()["type"], "object");
        assert_eq!(pipeline_schema()["type"], "object");
    }

    #[test]
    fn test_schema_patterns_match_constants() {
        for schema in [service_schema(), pipeline_schema()] {
            assert_eq!(schema["definitions"]["identifier"]["pattern"], IDENTIFIER_PATTERN);
            assert_eq!(schema["definitions"]["name"]["pattern"], NAME_PATTERN);
        }
    }

    #[test]
    fn test_schema_enum_covers_all_deployment_types() {
        let schema = service_schema();
        let allowed: Vec<&str> = schema["definitions"]["deploymentType"]["enum"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        let known: Vec<&str> = DeploymentType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(allowed, known);
    }
}
