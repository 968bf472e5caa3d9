//! Fuzzy search over definition names and resolved property trees.
//!
//! Matching is an ordered subsequence test: every character of the search string must appear in
//! the text, case-insensitively and in order, but not necessarily next to each other. An empty or
//! missing search matches everything.

use kubeschema_types::PropertyInfo;

const REQUIRED_KEYWORD: &str = "required";

fn is_blank(search: Option<&str>) -> bool {
    search.is_none_or(str::is_empty)
}

/// `fuzzy_match("Deployment", Some("dpm"))` is true; `Some("mdp")` is not.
pub fn fuzzy_match(text: &str, search: Option<&str>) -> bool {
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return true;
    };

    let mut wanted = search.chars().flat_map(char::to_lowercase).peekable();
    for c in text.chars().flat_map(char::to_lowercase) {
        match wanted.peek() {
            Some(&w) if w == c => {
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    wanted.peek().is_none()
}

/// Whether `property`, or anything below it, is relevant to `search`.
///
/// A node matches on its name, description or type, or on the word "required" when it is
/// required. Consumers use this to decide which nodes to show expanded.
pub fn property_matches_search(property: &PropertyInfo, search: Option<&str>) -> bool {
    if is_blank(search) {
        return true;
    }

    fuzzy_match(&property.name, search)
        || property
            .description
            .as_deref()
            .is_some_and(|d| fuzzy_match(d, search))
        || fuzzy_match(&property.type_name, search)
        || (property.required && fuzzy_match(REQUIRED_KEYWORD, search))
        || property
            .children()
            .iter()
            .any(|child| property_matches_search(child, search))
}

fn node_matches(property: &PropertyInfo, search: &str) -> bool {
    let search = Some(search);
    fuzzy_match(&property.name, search)
        || property
            .description
            .as_deref()
            .is_some_and(|d| fuzzy_match(d, search))
        || fuzzy_match(&property.type_name, search)
        || property
            .reference
            .as_deref()
            .is_some_and(|r| fuzzy_match(r, search))
}

/// Prune the subtree rooted at `property` down to the nodes matching `search`.
///
/// A node survives if it matches (name, description, type or ref) or if any descendant survives.
/// When at least one child survives, only surviving children are kept; a matching node whose
/// children all fail keeps its original children.
pub fn filter_property_tree(property: &PropertyInfo, search: &str) -> Option<PropertyInfo> {
    if search.is_empty() {
        return Some(property.clone());
    }

    let surviving: Vec<PropertyInfo> = property
        .children()
        .iter()
        .filter_map(|child| filter_property_tree(child, search))
        .collect();

    if !surviving.is_empty() {
        return Some(PropertyInfo {
            properties: Some(surviving),
            ..property.clone()
        });
    }

    node_matches(property, search).then(|| property.clone())
}

/// [`filter_property_tree`] over a sequence, dropping nodes that do not survive.
pub fn filter_properties(properties: &[PropertyInfo], search: &str) -> Vec<PropertyInfo> {
    if search.is_empty() {
        return properties.to_vec();
    }
    properties
        .iter()
        .filter_map(|p| filter_property_tree(p, search))
        .collect()
}

/// Names satisfying [`fuzzy_match`], order preserved.
pub fn filter_display_names<'a, I>(names: I, search: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    names
        .into_iter()
        .filter(|name| fuzzy_match(name, search))
        .cloned()
        .collect()
}
