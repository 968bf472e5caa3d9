use kubeschema_types::{PropertyInfo, RawPropertySchema, ResolvedSchema, SwaggerDocument};
use pretty_assertions::assert_eq;

#[test]
fn property_info_serializes_camel_case_and_omits_absent_fields() {
    let mut prop = PropertyInfo::leaf("containers", "array");
    prop.is_array = true;
    prop.required = true;
    prop.reference = Some("io.k8s.api.core.v1.Container".to_string());

    let value = serde_json::to_value(&prop).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "name": "containers",
            "type": "array",
            "required": true,
            "isArray": true,
            "ref": "io.k8s.api.core.v1.Container",
        })
    );
}

#[test]
fn empty_properties_are_kept_distinct_from_absent() {
    let mut prop = PropertyInfo::leaf("spec", "object");
    prop.properties = Some(vec![]);

    let value = serde_json::to_value(&prop).expect("serialize");
    assert_eq!(value["properties"], serde_json::json!([]));

    let leaf = serde_json::to_value(PropertyInfo::leaf("x", "string")).expect("serialize");
    assert!(leaf.get("properties").is_none());
}

#[test]
fn document_preserves_definition_and_property_order() {
    let doc: SwaggerDocument = serde_json::from_str(
        r#"{
            "swagger": "2.0",
            "info": { "title": "Kubernetes", "version": "v1.29.0" },
            "definitions": {
                "z.Last": { "properties": { "b": {"type": "string"}, "a": {"type": "string"} } },
                "a.First": { "type": "object" }
            }
        }"#,
    )
    .expect("parse");

    let keys: Vec<_> = doc.definitions.keys().cloned().collect();
    assert_eq!(keys, vec!["z.Last".to_string(), "a.First".to_string()]);

    let props: Vec<_> = doc.definitions["z.Last"]
        .properties
        .as_ref()
        .expect("properties")
        .keys()
        .cloned()
        .collect();
    assert_eq!(props, vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn document_without_definitions_is_empty() {
    let doc: SwaggerDocument = serde_json::from_str(r#"{"swagger": "2.0"}"#).expect("parse");
    assert!(doc.definitions.is_empty());
}

#[test]
fn ref_fragment_parses_dollar_ref() {
    let schema: RawPropertySchema = serde_json::from_str(
        r##"{"$ref": "#/definitions/io.k8s.api.core.v1.PodSpec", "description": "Spec."}"##,
    )
    .expect("parse");
    assert_eq!(schema.reference.as_deref(), Some("#/definitions/io.k8s.api.core.v1.PodSpec"));
    assert_eq!(schema.description.as_deref(), Some("Spec."));
}

#[test]
fn resolved_schema_round_trips_through_json() {
    let schema = ResolvedSchema {
        name: "io.k8s.api.core.v1.Pod".to_string(),
        description: Some("Pod is a collection of containers.".to_string()),
        type_name: "object".to_string(),
        properties: vec![PropertyInfo::leaf("kind", "string")],
        required: vec![],
    };

    let json = serde_json::to_string(&schema).expect("serialize");
    let back: ResolvedSchema = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, schema);
    assert_eq!(back.property("kind").map(|p| p.type_name.as_str()), Some("string"));
}

#[test]
fn node_count_and_depth_walk_nested_properties() {
    let mut inner = PropertyInfo::leaf("spec", "object");
    inner.properties = Some(vec![
        PropertyInfo::leaf("replicas", "integer"),
        PropertyInfo::leaf("paused", "boolean"),
    ]);
    let mut root = PropertyInfo::leaf("deployment", "object");
    root.properties = Some(vec![inner]);

    assert_eq!(root.node_count(), 4);
    assert_eq!(root.depth(), 3);
}
