//! Command output builders.
//!
//! Each function takes an already-loaded document and returns the exact text the command
//! prints, so the binary only does I/O.

use anyhow::Context;
use kubeschema_domain::{
    ReferenceGraph, ResolveOptions, SchemaResolver, list_display_names,
    list_top_level_display_names, to_display_name, to_raw_name,
};
use kubeschema_render::{render_names, render_schema_md, render_schema_text};
use kubeschema_search::{filter_display_names, filter_properties};
use kubeschema_types::Definitions;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShowFormat {
    Text,
    Json,
    Markdown,
}

/// Accepts either a raw definition key or a display name.
pub fn lookup_raw_name(definitions: &Definitions, name: &str) -> anyhow::Result<String> {
    if definitions.contains_key(name) {
        return Ok(name.to_string());
    }
    to_raw_name(name, definitions).ok_or_else(|| anyhow::anyhow!("unknown definition: {}", name))
}

pub fn versions_output(available: &[String], selected: Option<&str>) -> String {
    let mut out = String::new();
    for version in available {
        let marker = if Some(version.as_str()) == selected {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("{} {}\n", marker, version));
    }
    out
}

pub fn list_output(
    definitions: &Definitions,
    all: bool,
    search: Option<&str>,
    format: ListFormat,
) -> anyhow::Result<String> {
    let names = if all {
        list_display_names(definitions)
    } else {
        list_top_level_display_names(definitions)
    };
    let names = filter_display_names(&names, search);

    match format {
        ListFormat::Text => Ok(render_names(&names)),
        ListFormat::Json => to_json(&names),
    }
}

pub fn show_output(
    definitions: &Definitions,
    name: &str,
    search: Option<&str>,
    options: ResolveOptions,
    format: ShowFormat,
) -> anyhow::Result<String> {
    let raw = lookup_raw_name(definitions, name)?;
    let mut schema = SchemaResolver::with_options(definitions, options)
        .resolve(&raw)
        .with_context(|| format!("resolve {}", raw))?;

    if let Some(search) = search.filter(|s| !s.is_empty()) {
        schema.properties = filter_properties(&schema.properties, search);
    }

    match format {
        ShowFormat::Text => Ok(render_schema_text(&schema)),
        ShowFormat::Json => to_json(&schema),
        ShowFormat::Markdown => Ok(render_schema_md(&schema)),
    }
}

#[derive(Debug, Serialize)]
struct RefsReport<'a> {
    name: &'a str,
    references: Vec<&'a str>,
    referrers: Vec<&'a str>,
}

pub fn refs_output(
    definitions: &Definitions,
    name: &str,
    format: ListFormat,
) -> anyhow::Result<String> {
    let raw = lookup_raw_name(definitions, name)?;
    let graph = ReferenceGraph::build(definitions);
    let report = RefsReport {
        name: &raw,
        references: graph.references(&raw).collect(),
        referrers: graph.referrers(&raw).collect(),
    };

    match format {
        ListFormat::Json => to_json(&report),
        ListFormat::Text => {
            let mut out = format!("{}\n", to_display_name(report.name));
            push_section(&mut out, "references", &report.references);
            push_section(&mut out, "referenced by", &report.referrers);
            Ok(out)
        }
    }
}

fn push_section(out: &mut String, title: &str, names: &[&str]) {
    out.push_str(&format!("{}:\n", title));
    if names.is_empty() {
        out.push_str("  (none)\n");
    }
    for name in names {
        out.push_str(&format!("  {}\n", to_display_name(name)));
    }
}

fn to_json<T: Serialize + ?Sized>(v: &T) -> anyhow::Result<String> {
    let mut s = serde_json::to_string_pretty(v).context("serialize json")?;
    s.push('\n');
    Ok(s)
}
