use crate::names::to_display_name;
use crate::shape::{non_empty, ref_name};
use indexmap::IndexMap;
use kubeschema_types::literal::TYPE_ARRAY;
use kubeschema_types::{Definitions, RawPropertySchema};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Suffix of collection wrappers such as `PodList`.
const LIST_SUFFIX: &str = "List";

fn is_list_wrapper(name: &str) -> bool {
    name.ends_with(LIST_SUFFIX)
}

/// Outgoing `$ref` edges of every definition.
///
/// Edges are collected from direct references, array `items` and map `additionalProperties`,
/// descending through inline `properties`. Targets need not exist in the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceGraph {
    outgoing: BTreeMap<String, BTreeSet<String>>,
}

impl ReferenceGraph {
    pub fn build(definitions: &Definitions) -> Self {
        let outgoing = definitions
            .iter()
            .map(|(name, definition)| {
                let mut targets = BTreeSet::new();
                if let Some(properties) = definition.properties.as_ref() {
                    scan_for_references(properties, &mut targets);
                }
                (name.clone(), targets)
            })
            .collect();
        Self { outgoing }
    }

    /// Definitions that `name` points at.
    pub fn references(&self, name: &str) -> impl Iterator<Item = &str> {
        self.outgoing
            .get(name)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// Definitions that point at `name`, in ascending order.
    pub fn referrers<'g>(&'g self, name: &'g str) -> impl Iterator<Item = &'g str> {
        self.outgoing
            .iter()
            .filter(move |(_, targets)| targets.contains(name))
            .map(|(source, _)| source.as_str())
    }

    /// Every target referenced from a definition that is not a `*List` wrapper.
    pub fn referenced_set(&self) -> BTreeSet<String> {
        self.outgoing
            .iter()
            .filter(|(source, _)| !is_list_wrapper(source))
            .flat_map(|(_, targets)| targets.iter().cloned())
            .collect()
    }
}

/// Names reachable via `$ref` from any non-`List` definition.
pub fn compute_referenced_set(definitions: &Definitions) -> BTreeSet<String> {
    let mut referenced = BTreeSet::new();
    for (name, definition) in definitions {
        if is_list_wrapper(name) {
            continue;
        }
        if let Some(properties) = definition.properties.as_ref() {
            scan_for_references(properties, &mut referenced);
        }
    }
    referenced
}

/// Display names of the definitions nothing else points at, excluding `*List` wrappers.
///
/// These are the resource entry points (`core/v1/Pod`, `apps/v1/Deployment`) as opposed to
/// building blocks like `ObjectMeta`.
pub fn list_top_level_display_names(definitions: &Definitions) -> Vec<String> {
    let referenced = compute_referenced_set(definitions);
    let mut names: Vec<String> = definitions
        .keys()
        .filter(|name| !is_list_wrapper(name) && !referenced.contains(name.as_str()))
        .map(|name| to_display_name(name))
        .collect();
    names.sort();

    debug!(
        total = definitions.len(),
        referenced = referenced.len(),
        top_level = names.len(),
        "classified definitions"
    );
    names
}

fn scan_for_references(
    properties: &IndexMap<String, RawPropertySchema>,
    out: &mut BTreeSet<String>,
) {
    for schema in properties.values() {
        if let Some(reference) = non_empty(&schema.reference) {
            out.insert(ref_name(reference).to_string());
        }

        if non_empty(&schema.type_name) == Some(TYPE_ARRAY)
            && let Some(reference) = schema
                .items
                .as_deref()
                .and_then(|items| non_empty(&items.reference))
        {
            out.insert(ref_name(reference).to_string());
        }

        if let Some(reference) = schema
            .additional_properties
            .as_ref()
            .and_then(|a| a.schema())
            .and_then(|s| non_empty(&s.reference))
        {
            out.insert(ref_name(reference).to_string());
        }

        if let Some(nested) = schema.properties.as_ref() {
            scan_for_references(nested, out);
        }
    }
}
