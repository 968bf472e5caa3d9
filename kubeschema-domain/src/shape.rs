use indexmap::IndexMap;
use kubeschema_types::literal::{DEFINITIONS_REF_PREFIX, TYPE_ARRAY, TYPE_OBJECT};
use kubeschema_types::RawPropertySchema;

/// The recognised shapes of a property fragment.
///
/// [`PropertyShape::classify`] checks them in a fixed precedence so every fragment maps to exactly
/// one variant: reference, array, inline object, map, then primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyShape<'a> {
    /// `{"$ref": ...}`
    Ref { target: &'a str },

    /// `{"type": "array", "items": {"$ref": ...}}`
    ArrayOfRef { target: &'a str },

    /// `{"type": "array", "items": {"type": ...}}`
    ArrayOfPrimitive {
        item_type: &'a str,
        item_description: Option<&'a str>,
    },

    /// An array whose `items` carry neither a reference nor a type.
    Array,

    /// `{"type": "object", "properties": {...}}`
    InlineObject {
        properties: &'a IndexMap<String, RawPropertySchema>,
        required: &'a [String],
    },

    /// `{"additionalProperties": ...}`, optionally with a `$ref` for the values.
    Map { value_target: Option<&'a str> },

    /// Anything else; `type_name` is `None` when the fragment has no usable `type`.
    Primitive { type_name: Option<&'a str> },
}

impl<'a> PropertyShape<'a> {
    pub fn classify(schema: &'a RawPropertySchema) -> Self {
        if let Some(reference) = non_empty(&schema.reference) {
            return PropertyShape::Ref {
                target: ref_name(reference),
            };
        }

        let type_name = non_empty(&schema.type_name);

        if type_name == Some(TYPE_ARRAY)
            && let Some(items) = schema.items.as_deref()
        {
            if let Some(reference) = non_empty(&items.reference) {
                return PropertyShape::ArrayOfRef {
                    target: ref_name(reference),
                };
            }
            if let Some(item_type) = non_empty(&items.type_name) {
                return PropertyShape::ArrayOfPrimitive {
                    item_type,
                    item_description: items.description.as_deref(),
                };
            }
            return PropertyShape::Array;
        }

        if type_name == Some(TYPE_OBJECT)
            && let Some(properties) = schema.properties.as_ref()
        {
            return PropertyShape::InlineObject {
                properties,
                required: schema.required.as_deref().unwrap_or_default(),
            };
        }

        if let Some(additional) = schema
            .additional_properties
            .as_ref()
            .filter(|a| a.is_present())
        {
            let value_target = additional
                .schema()
                .and_then(|s| non_empty(&s.reference))
                .map(ref_name);
            return PropertyShape::Map { value_target };
        }

        PropertyShape::Primitive { type_name }
    }
}

/// `#/definitions/io.k8s.api.core.v1.Pod` -> `io.k8s.api.core.v1.Pod`.
///
/// References without the local-definitions prefix are returned unchanged.
pub fn ref_name(reference: &str) -> &str {
    reference
        .strip_prefix(DEFINITIONS_REF_PREFIX)
        .unwrap_or(reference)
}

/// Empty strings count as missing, the same as an absent key.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
