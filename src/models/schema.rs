use schemars::schema_for;
use serde_json::{json, Value};

use crate::models::extraction::ContractExtraction;

/// JSON schema for the extraction result, as derived from the model types
pub fn extraction_schema() -> Value {
    let root = schema_for!(ContractExtraction);
    let mut schema = serde_json::to_value(root).unwrap_or_else(|_| json!({}));
    deny_additional_properties(&mut schema);
    schema
}

/// Build the `response_format` object for the OpenAI structured-output API.
/// Strict mode requires `additionalProperties: false` on every object node.
pub fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "contract_extraction",
            "schema": extraction_schema(),
            "strict": true
        }
    })
}

/// Recursively mark every object schema as closed
fn deny_additional_properties(node: &mut Value) {
    match node {
        Value::Object(map) => {
            let is_object_schema = map.get("type").and_then(Value::as_str) == Some("object")
                || map.contains_key("properties");
            if is_object_schema {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for value in map.values_mut() {
                deny_additional_properties(value);
            }
        }
        Value::Array(items) => {
            for item in items {
                deny_additional_properties(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_objects_closed(node: &Value, path: &str) {
        match node {
            Value::Object(map) => {
                if map.get("type").and_then(Value::as_str) == Some("object") {
                    assert_eq!(
                        map.get("additionalProperties"),
                        Some(&Value::Bool(false)),
                        "object at {path} is not closed"
                    );
                }
                for (key, value) in map {
                    assert_objects_closed(value, &format!("{path}/{key}"));
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    assert_objects_closed(item, &format!("{path}[{i}]"));
                }
            }
            _ => {}
        }
    }

    #[test]
    fn every_object_in_the_schema_is_closed() {
        let schema = extraction_schema();
        assert_objects_closed(&schema, "");
    }

    #[test]
    fn response_format_is_strict_json_schema() {
        let format = response_format();
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "contract_extraction");
        assert_eq!(format["json_schema"]["strict"], true);
        assert!(format["json_schema"]["schema"].is_object());
    }

    #[test]
    fn schema_names_the_four_top_level_sections() {
        let schema = extraction_schema();
        let properties = schema["properties"].as_object().expect("properties");
        for section in [
            "contract_metadata",
            "financial_terms",
            "pricing_rules",
            "extraction_metadata",
        ] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
