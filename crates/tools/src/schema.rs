//! JSON Schemas advertised in `tools/list`.

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{json, Map, Value};

/// Inlined draft-07 schema for a request type, without `$schema`/`title`.
pub fn input_schema<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let root = generator.into_root_schema_for::<T>();

    let mut schema = serde_json::to_value(root).unwrap_or_else(|_| json!({"type": "object"}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
        object.remove("definitions");
    }
    schema
}

/// `{success, errors}` plus any payload members the operation returns.
pub fn response_schema(payload: &[(&str, &str)]) -> Value {
    let mut properties = Map::new();
    for (key, json_type) in payload {
        properties.insert(key.to_string(), json!({ "type": json_type }));
    }
    envelope(properties)
}

/// Envelope whose payload member is `P`, or `null` on failure.
pub fn projected_schema<P: JsonSchema>(payload_key: &str) -> Value {
    let mut payload = input_schema::<P>();
    if let Some(object) = payload.as_object_mut() {
        object.insert("type".to_string(), json!(["object", "null"]));
    }

    let mut properties = Map::new();
    properties.insert(payload_key.to_string(), payload);
    envelope(properties)
}

fn envelope(mut properties: Map<String, Value>) -> Value {
    properties.insert("success".to_string(), json!({"type": "boolean"}));
    properties.insert(
        "errors".to_string(),
        json!({"type": "array", "items": {"type": "string"}}),
    );

    json!({
        "type": "object",
        "properties": properties,
        "required": ["success"]
    })
}
