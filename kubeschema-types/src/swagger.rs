use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Definitions keyed by their fully-qualified dotted name, in document order.
pub type Definitions = IndexMap<String, RawDefinition>;

/// A swagger document as found on disk.
///
/// Only `definitions` is read; paths, parameters and security blocks are ignored. A document
/// without a `definitions` key yields an empty map, and a definition that is not an object is
/// kept as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    #[serde(default, deserialize_with = "lenient_definitions")]
    pub definitions: Definitions,
}

/// One entry of the definitions map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDefinition {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared properties. `Some` with an empty map is distinct from `None`.
    #[serde(
        default,
        deserialize_with = "lenient_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<IndexMap<String, RawPropertySchema>>,

    #[serde(default, deserialize_with = "lenient_names", skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// The schema fragment of a single property.
///
/// Every field is optional; the resolver decides the shape from which ones are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPropertySchema {
    #[serde(
        rename = "$ref",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any truthy value counts as present; a malformed one is an empty fragment.
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawPropertySchema>>,

    #[serde(
        default,
        deserialize_with = "lenient_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<IndexMap<String, RawPropertySchema>>,

    /// Required names for inline `properties`.
    #[serde(default, deserialize_with = "lenient_names", skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(
        rename = "additionalProperties",
        default,
        deserialize_with = "lenient_additional",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

/// `additionalProperties` is either a schema for map values or a plain boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<RawPropertySchema>),
}

impl AdditionalProperties {
    /// `false` behaves as if the key were missing.
    pub fn is_present(&self) -> bool {
        !matches!(self, AdditionalProperties::Allowed(false))
    }

    pub fn schema(&self) -> Option<&RawPropertySchema> {
        match self {
            AdditionalProperties::Schema(schema) => Some(schema),
            AdditionalProperties::Allowed(_) => None,
        }
    }
}

impl RawPropertySchema {
    /// Shorthand for a `$ref` fragment pointing at `#/definitions/<name>`.
    pub fn reference_to(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", crate::literal::DEFINITIONS_REF_PREFIX, name)),
            ..Self::default()
        }
    }

    pub fn primitive(type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            ..Self::default()
        }
    }
}

/// Accept any JSON value and keep it only if it has the expected shape.
///
/// Generated schemas are not validated before they reach us, so a wrongly-typed key must not
/// reject the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// A JSON object whose entries are parsed one by one. An entry of the wrong shape becomes
/// `T::default()` so its siblings survive.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Some(Value::Object(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .map(|(name, value)| (name, serde_json::from_value(value).unwrap_or_default()))
            .collect(),
    ))
}

fn lenient_definitions<'de, D>(deserializer: D) -> Result<Definitions, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_entries(deserializer)?.unwrap_or_default())
}

/// String entries of a JSON array; anything else in the array is dropped.
fn lenient_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(values)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    ))
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Box<RawPropertySchema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(is_truthy)
        .map(|v| Box::new(serde_json::from_value(v).unwrap_or_default())))
}

fn lenient_additional<'de, D>(deserializer: D) -> Result<Option<AdditionalProperties>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Object(_) => {
            AdditionalProperties::Schema(Box::new(serde_json::from_value(v).unwrap_or_default()))
        }
        other => AdditionalProperties::Allowed(is_truthy(&other)),
    }))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrongly_typed_keys_degrade_to_none() {
        let schema: RawPropertySchema = serde_json::from_value(serde_json::json!({
            "type": 7,
            "description": ["not", "a", "string"],
            "required": "name",
            "properties": [1, 2],
        }))
        .expect("parse");
        assert_eq!(schema, RawPropertySchema::default());
    }

    #[test]
    fn malformed_property_entry_keeps_its_siblings() {
        let def: RawDefinition = serde_json::from_value(serde_json::json!({
            "properties": { "good": { "type": "string" }, "bad": 5, "last": { "type": "integer" } }
        }))
        .expect("parse");

        let properties = def.properties.expect("properties");
        let names: Vec<_> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["good", "bad", "last"]);
        assert_eq!(properties["good"].type_name.as_deref(), Some("string"));
        assert_eq!(properties["bad"], RawPropertySchema::default());
    }

    #[test]
    fn required_keeps_only_string_entries() {
        let def: RawDefinition =
            serde_json::from_value(serde_json::json!({ "required": ["good", 1, null, "other"] }))
                .expect("parse");
        assert_eq!(
            def.required,
            Some(vec!["good".to_string(), "other".to_string()])
        );
    }

    #[test]
    fn malformed_definition_does_not_reject_the_document() {
        let doc: SwaggerDocument = serde_json::from_str(
            r#"{"definitions": {"A": {"type": "object"}, "B": 5, "C": {"type": "string"}}}"#,
        )
        .expect("parse");
        let keys: Vec<_> = doc.definitions.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert_eq!(doc.definitions["B"], RawDefinition::default());
        assert_eq!(doc.definitions["C"].type_name.as_deref(), Some("string"));
    }

    #[test]
    fn malformed_items_still_count_as_present() {
        let schema: RawPropertySchema =
            serde_json::from_value(serde_json::json!({ "type": "array", "items": "nope" }))
                .expect("parse");
        assert_eq!(schema.items.as_deref(), Some(&RawPropertySchema::default()));

        let falsy: RawPropertySchema =
            serde_json::from_value(serde_json::json!({ "type": "array", "items": false }))
                .expect("parse");
        assert!(falsy.items.is_none());
    }

    #[test]
    fn additional_properties_accepts_bool_and_schema() {
        let open: RawPropertySchema =
            serde_json::from_str(r#"{"additionalProperties": true}"#).expect("parse");
        let closed: RawPropertySchema =
            serde_json::from_str(r#"{"additionalProperties": false}"#).expect("parse");
        let typed: RawPropertySchema =
            serde_json::from_str(r#"{"additionalProperties": {"type": "string"}}"#).expect("parse");

        assert!(open.additional_properties.as_ref().is_some_and(|a| a.is_present()));
        assert!(!closed.additional_properties.as_ref().is_some_and(|a| a.is_present()));
        let value_schema = typed
            .additional_properties
            .as_ref()
            .and_then(AdditionalProperties::schema)
            .expect("schema");
        assert_eq!(value_schema.type_name.as_deref(), Some("string"));
    }

    #[test]
    fn reference_to_uses_definitions_prefix() {
        let schema = RawPropertySchema::reference_to("io.k8s.api.core.v1.Pod");
        assert_eq!(
            schema.reference.as_deref(),
            Some("#/definitions/io.k8s.api.core.v1.Pod")
        );
    }
}
