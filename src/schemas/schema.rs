use schemars::{gen::SchemaSettings, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{any::type_name, sync::Arc};

/// Keywords carried over into the generation service's schema dialect.
const SERVICE_SCHEMA_KEYWORDS: [&str; 2] = ["description", "required"];

/// Cached JSON schema handle associated with a response type.
///
/// The same handle drives both the outbound schema hint and the inbound
/// validation, so the two can never drift apart.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    schema_json: Arc<Value>,
    response_schema: Arc<Value>,
}

impl SchemaHandle {
    /// Generate the schema for `T` with every sub-schema inlined.
    pub fn for_type<T: JsonSchema + 'static>(schema_name: &'static str) -> Self {
        let root = SchemaSettings::draft07()
            .with(|settings| {
                settings.inline_subschemas = true;
                settings.option_add_null_type = false;
            })
            .into_generator()
            .into_root_schema_for::<T>();

        let schema_json = serde_json::to_value(root).unwrap_or_else(|err| {
            panic!("failed to serialize schema for {}: {}", type_name::<T>(), err)
        });
        Self::from_value::<T>(schema_name, schema_json)
    }

    pub fn from_value<T: 'static>(schema_name: &'static str, schema_json: Value) -> Self {
        let response_schema = project_for_service(&schema_json);
        Self {
            schema_name,
            type_name: type_name::<T>(),
            schema_json: Arc::new(schema_json),
            response_schema: Arc::new(response_schema),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Full Draft 7 schema used for validation
    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Projection sent to the generation service as `responseSchema`
    pub fn response_schema(&self) -> &Value {
        self.response_schema.as_ref()
    }
}

pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Reduce a JSON schema to the OpenAPI subset the generation service accepts:
/// upper-cased `type`, `description`, `properties`, `required` and `items`.
pub fn project_for_service(schema: &Value) -> Value {
    let Some(object) = schema.as_object() else {
        return Value::Object(Map::new());
    };

    let mut projected = Map::new();

    if let Some(kind) = object.get("type").and_then(Value::as_str) {
        projected.insert(
            "type".to_string(),
            Value::String(kind.to_ascii_uppercase()),
        );
    }

    for keyword in SERVICE_SCHEMA_KEYWORDS {
        if let Some(value) = object.get(keyword) {
            projected.insert(keyword.to_string(), value.clone());
        }
    }

    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        let properties = properties
            .iter()
            .map(|(name, property)| (name.clone(), project_for_service(property)))
            .collect();
        projected.insert("properties".to_string(), Value::Object(properties));
    }

    if let Some(items) = object.get("items") {
        projected.insert("items".to_string(), project_for_service(items));
    }

    Value::Object(projected)
}
