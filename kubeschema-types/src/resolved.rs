use serde::{Deserialize, Serialize};

/// The resolved, display-ready representation of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,

    /// `object`, `array`, `object (map)`, a primitive type, or `any`.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub is_array: bool,

    /// Dereferenced definition name for `$ref` properties, arrays of refs and maps of refs.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Exactly one synthetic element when the property is an array of primitives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PropertyInfo>>,

    /// Nested fields in declaration order; `None` for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyInfo>>,
}

impl PropertyInfo {
    /// A leaf with only a name and a type.
    pub fn leaf(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: None,
            required: false,
            is_array: false,
            reference: None,
            items: None,
            properties: None,
        }
    }

    pub fn children(&self) -> &[PropertyInfo] {
        self.properties.as_deref().unwrap_or_default()
    }

    /// Number of nodes in this subtree, counting `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(PropertyInfo::node_count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting `self`.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(PropertyInfo::depth)
            .max()
            .unwrap_or(0)
    }
}

/// A fully resolved definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchema {
    /// Raw definition key, e.g. `io.k8s.api.core.v1.Pod`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub properties: Vec<PropertyInfo>,

    /// The definition's `required` list, copied as-is.
    #[serde(default)]
    pub required: Vec<String>,
}

impl ResolvedSchema {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }
}
