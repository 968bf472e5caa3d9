#![no_main]

//! Fuzz target for the full parse, list, resolve and filter pipeline.
//!
//! Every definition of an arbitrary document must resolve without panicking or
//! recursing forever, whatever references and cycles it contains.

use kubeschema_domain::{
    ReferenceGraph, SchemaResolver, list_display_names, list_top_level_display_names,
    to_raw_name,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<kubeschema_types::SwaggerDocument>(data) else {
        return;
    };
    let definitions = &doc.definitions;

    let _ = list_top_level_display_names(definitions);
    for display in list_display_names(definitions) {
        let _ = to_raw_name(&display, definitions);
    }

    let graph = ReferenceGraph::build(definitions);
    let resolver = SchemaResolver::new(definitions);
    for name in definitions.keys() {
        let _ = graph.referrers(name).count();
        if let Ok(schema) = resolver.resolve(name) {
            let _ = kubeschema_search::filter_properties(&schema.properties, "a");
            let _ = serde_json::to_string(&schema);
        }
    }
});
