use jsonschema::Validator;
use serde_json::Value;

/// JSON Schema every generated plan has to satisfy before it is turned into a task
pub const TASK_SCHEMA: &str = r#"{
  "type": "object",
  "required": ["title", "description", "steps"],
  "properties": {
    "title": {"type": "string"},
    "description": {"type": "string"},
    "steps": {
      "type": "array",
      "minItems": 1,
      "items": {
        "type": "object",
        "required": ["instruction"],
        "properties": {
          "instruction": {"type": "string"},
          "target": {
            "type": ["object", "null"],
            "required": ["x", "y", "w", "h"],
            "properties": {
              "x": {"type": "number"},
              "y": {"type": "number"},
              "w": {"type": "number"},
              "h": {"type": "number"}
            }
          },
          "actions": {
            "type": "array",
            "items": {
              "type": "object",
              "required": ["type"],
              "properties": {
                "type": {"type": "string"},
                "value": {"type": "string"}
              }
            }
          }
        }
      }
    }
  }
}"#;

/// Creates a JSON Schema validator from a schema string
///
/// # Arguments
/// * `schema_content` - The JSON Schema as a string
///
/// # Returns
/// * `Result<Validator, String>` - The compiled validator on success, or why it could not be built
pub fn build_validator(schema_content: &str) -> Result<Validator, String> {
    let schema: Value = serde_json::from_str(schema_content).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
}

/// Checks a parsed document against a compiled validator
///
/// # Returns
/// * `Result<(), String>` - The first violation, if any
pub fn validate_document(schema: &Validator, document: &Value) -> Result<(), String> {
    match schema.iter_errors(document).next() {
        Some(error) => Err(error.to_string()),
        None => Ok(()),
    }
}
