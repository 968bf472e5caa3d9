//! Domain logic: turn a swagger definitions map into resolved property trees.
//!
//! This crate owns *what* a definition looks like once every `$ref` is followed. It never loads
//! documents; that's the `kubeschema-catalog` crate. Every function here is pure over an
//! immutable [`Definitions`](kubeschema_types::Definitions) map.

mod error;
mod graph;
mod names;
mod resolver;
mod shape;

pub use error::ResolveError;
pub use graph::{ReferenceGraph, compute_referenced_set, list_top_level_display_names};
pub use names::{KNOWN_PREFIXES, list_display_names, to_display_name, to_raw_name};
pub use resolver::{
    DEFAULT_MAX_DEPTH, PropertyResolver, ResolveOptions, SchemaResolver, VisitedRefs,
    resolve_schema,
};
pub use shape::{PropertyShape, ref_name};
