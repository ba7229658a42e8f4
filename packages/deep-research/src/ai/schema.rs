//! Strict JSON schemas for structured model responses.
//!
//! OpenAI's strict `json_schema` mode only accepts fully inlined schemas where
//! every object sets `additionalProperties: false` and lists every property as
//! required. `schemars` output needs both fixes.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A type the model can be asked to answer with.
pub trait ResponseSchema: JsonSchema + DeserializeOwned {
    /// Name sent alongside the schema.
    fn response_name() -> String {
        <Self as JsonSchema>::schema_name()
    }

    /// Strict-mode schema for this type.
    fn strict_schema() -> Value {
        let mut root = serde_json::to_value(schema_for!(Self)).unwrap_or_default();
        let definitions = match &mut root {
            Value::Object(map) => {
                map.remove("$schema");
                map.remove("definitions")
            }
            _ => None,
        };
        make_strict(&mut root, definitions.as_ref());
        root
    }
}

impl<T: JsonSchema + DeserializeOwned> ResponseSchema for T {}

fn make_strict(value: &mut Value, definitions: Option<&Value>) {
    match value {
        Value::Object(map) => {
            if let Some(definition) = resolve_ref(map, definitions) {
                *value = definition;
                make_strict(value, definitions);
                return;
            }

            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".into(), Value::Bool(false));
                if let Some(Value::Object(properties)) = map.get("properties") {
                    let required = properties.keys().cloned().map(Value::String).collect();
                    map.insert("required".into(), Value::Array(required));
                }
            }

            for nested in map.values_mut() {
                make_strict(nested, definitions);
            }
        }
        Value::Array(items) => {
            for item in items {
                make_strict(item, definitions);
            }
        }
        _ => {}
    }
}

fn resolve_ref(map: &Map<String, Value>, definitions: Option<&Value>) -> Option<Value> {
    let name = map
        .get("$ref")?
        .as_str()?
        .strip_prefix("#/definitions/")?;
    definitions?.get(name).cloned()
}
