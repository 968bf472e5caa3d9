use crate::error::ResolveError;
use crate::shape::PropertyShape;
use indexmap::IndexMap;
use kubeschema_types::literal::{ARRAY_ITEM_NAME, TYPE_ANY, TYPE_ARRAY, TYPE_MAP, TYPE_OBJECT};
use kubeschema_types::{Definitions, PropertyInfo, RawPropertySchema, ResolvedSchema};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Depth at which reference expansion stops when no other limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// References are only expanded while the current depth is below this value.
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reference names on the current root-to-node path.
///
/// Entries are added before descending into a reference and removed on the way back, so the same
/// definition can still be expanded on a sibling branch.
#[derive(Debug, Default)]
pub struct VisitedRefs<'a> {
    names: HashSet<&'a str>,
}

impl<'a> VisitedRefs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `false` if `name` was already on the path.
    pub fn enter(&mut self, name: &'a str) -> bool {
        self.names.insert(name)
    }

    pub fn leave(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolves one property fragment into a [`PropertyInfo`], following references.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'a> {
    definitions: &'a Definitions,
    options: ResolveOptions,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(definitions: &'a Definitions, options: ResolveOptions) -> Self {
        Self {
            definitions,
            options,
        }
    }

    pub fn resolve(
        &self,
        name: &str,
        schema: &'a RawPropertySchema,
        required: &[String],
        visited: &mut VisitedRefs<'a>,
        depth: usize,
    ) -> PropertyInfo {
        let mut info = PropertyInfo::leaf(name, TYPE_ANY);
        info.description = schema.description.clone();
        info.required = required.iter().any(|r| r == name);

        match PropertyShape::classify(schema) {
            PropertyShape::Ref { target } => {
                info.type_name = TYPE_OBJECT.to_string();
                info.reference = Some(target.to_string());
                info.properties = self.expand_reference(target, visited, depth);
            }
            PropertyShape::ArrayOfRef { target } => {
                info.type_name = TYPE_ARRAY.to_string();
                info.is_array = true;
                info.reference = Some(target.to_string());
                info.properties = self.expand_reference(target, visited, depth);
            }
            PropertyShape::ArrayOfPrimitive {
                item_type,
                item_description,
            } => {
                info.type_name = TYPE_ARRAY.to_string();
                info.is_array = true;
                let mut item = PropertyInfo::leaf(ARRAY_ITEM_NAME, item_type);
                item.description = item_description.map(str::to_string);
                info.items = Some(vec![item]);
            }
            PropertyShape::Array => {
                info.type_name = TYPE_ARRAY.to_string();
                info.is_array = true;
            }
            PropertyShape::InlineObject {
                properties,
                required,
            } => {
                info.type_name = TYPE_OBJECT.to_string();
                info.properties =
                    Some(self.resolve_properties(properties, required, visited, depth + 1));
            }
            PropertyShape::Map { value_target } => {
                info.type_name = TYPE_MAP.to_string();
                info.reference = value_target.map(str::to_string);
            }
            PropertyShape::Primitive { type_name } => {
                if let Some(type_name) = type_name {
                    info.type_name = type_name.to_string();
                }
            }
        }

        info
    }

    /// Resolve every entry of a `properties` mapping, in declaration order.
    pub fn resolve_properties(
        &self,
        properties: &'a IndexMap<String, RawPropertySchema>,
        required: &[String],
        visited: &mut VisitedRefs<'a>,
        depth: usize,
    ) -> Vec<PropertyInfo> {
        properties
            .iter()
            .map(|(name, schema)| self.resolve(name, schema, required, visited, depth))
            .collect()
    }

    /// Nested properties of `target`, or `None` when the branch must stay a leaf.
    fn expand_reference(
        &self,
        target: &'a str,
        visited: &mut VisitedRefs<'a>,
        depth: usize,
    ) -> Option<Vec<PropertyInfo>> {
        if visited.contains(target) {
            trace!(reference = target, depth, "reference already on path; not expanding");
            return None;
        }
        if depth >= self.options.max_depth {
            trace!(reference = target, depth, "depth limit reached; not expanding");
            return None;
        }

        let definition = self.definitions.get(target)?;
        let properties = definition.properties.as_ref()?;
        let required = definition.required.as_deref().unwrap_or_default();

        visited.enter(target);
        let resolved = self.resolve_properties(properties, required, visited, depth + 1);
        visited.leave(target);
        Some(resolved)
    }
}

/// Resolves whole definitions.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    definitions: &'a Definitions,
    options: ResolveOptions,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(definitions: &'a Definitions) -> Self {
        Self::with_options(definitions, ResolveOptions::default())
    }

    pub fn with_options(definitions: &'a Definitions, options: ResolveOptions) -> Self {
        Self {
            definitions,
            options,
        }
    }

    pub fn resolve(&self, name: &str) -> Result<ResolvedSchema, ResolveError> {
        let Some((key, definition)) = self.definitions.get_key_value(name) else {
            return Err(ResolveError::DefinitionNotFound {
                name: name.to_string(),
            });
        };

        debug!(definition = %key, max_depth = self.options.max_depth, "resolving schema");

        // The root counts as visited so a self-reference is not expanded into a second copy.
        let mut visited = VisitedRefs::new();
        visited.enter(key.as_str());

        let required = definition.required.clone().unwrap_or_default();
        let properties = match definition.properties.as_ref() {
            Some(properties) => PropertyResolver::new(self.definitions, self.options)
                .resolve_properties(properties, &required, &mut visited, 0),
            None => Vec::new(),
        };

        Ok(ResolvedSchema {
            name: key.clone(),
            description: definition.description.clone(),
            type_name: definition
                .type_name
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| TYPE_OBJECT.to_string()),
            properties,
            required,
        })
    }
}

/// Resolve `name` with the default depth limit.
pub fn resolve_schema(
    name: &str,
    definitions: &Definitions,
) -> Result<ResolvedSchema, ResolveError> {
    SchemaResolver::new(definitions).resolve(name)
}
