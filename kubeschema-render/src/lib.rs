//! Rendering helpers (plain text tree and markdown) for resolved schemas.

use kubeschema_domain::to_display_name;
use kubeschema_types::{PropertyInfo, ResolvedSchema};

const INDENT: &str = "  ";

/// Indented tree, one property per line: `name: type [required] -> ref`.
pub fn render_schema_text(schema: &ResolvedSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        to_display_name(&schema.name),
        schema.type_name
    ));
    if let Some(desc) = &schema.description {
        out.push_str(&format!("{}\n", first_line(desc)));
    }
    out.push('\n');

    if schema.properties.is_empty() {
        out.push_str("(no properties)\n");
        return out;
    }

    for prop in &schema.properties {
        push_text_property(&mut out, prop, 0);
    }
    out
}

fn push_text_property(out: &mut String, prop: &PropertyInfo, level: usize) {
    out.push_str(&INDENT.repeat(level));
    out.push_str(&prop.name);
    if prop.is_array {
        out.push_str("[]");
    }
    out.push_str(": ");
    out.push_str(&prop.type_name);
    if prop.required {
        out.push_str(" [required]");
    }
    if let Some(reference) = &prop.reference {
        out.push_str(" -> ");
        out.push_str(reference);
    }
    out.push('\n');

    for item in prop.items.iter().flatten() {
        push_text_property(out, item, level + 1);
    }
    for child in prop.children() {
        push_text_property(out, child, level + 1);
    }
}

/// Markdown document with a flattened field table.
pub fn render_schema_md(schema: &ResolvedSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", to_display_name(&schema.name)));
    out.push_str(&format!("- Definition: `{}`\n", schema.name));
    out.push_str(&format!("- Type: `{}`\n", schema.type_name));
    if !schema.required.is_empty() {
        let required: Vec<String> = schema.required.iter().map(|r| format!("`{r}`")).collect();
        out.push_str(&format!("- Required: {}\n", required.join(", ")));
    }
    if let Some(desc) = &schema.description {
        out.push_str(&format!("\n{}\n", desc.trim()));
    }

    out.push_str("\n## Fields\n\n");
    if schema.properties.is_empty() {
        out.push_str("_No properties._\n");
        return out;
    }

    out.push_str("| Field | Type | Required | Description |\n");
    out.push_str("|---|---|---|---|\n");
    for prop in &schema.properties {
        push_md_rows(&mut out, prop, "");
    }
    out
}

fn push_md_rows(out: &mut String, prop: &PropertyInfo, parent: &str) {
    let mut path = if parent.is_empty() {
        prop.name.clone()
    } else {
        format!("{parent}.{}", prop.name)
    };
    if prop.is_array {
        path.push_str("[]");
    }

    let item_type = prop.items.as_deref().and_then(|items| items.first());
    let type_cell = match (&prop.reference, item_type) {
        (Some(reference), _) => {
            format!("`{}` → `{}`", prop.type_name, to_display_name(reference))
        }
        (None, Some(item)) => format!("`{}` of `{}`", prop.type_name, item.type_name),
        (None, None) => format!("`{}`", prop.type_name),
    };
    let description = prop
        .description
        .as_deref()
        .map(escape_cell)
        .unwrap_or_default();
    out.push_str(&format!(
        "| `{}` | {} | {} | {} |\n",
        path,
        type_cell,
        if prop.required { "yes" } else { "" },
        description
    ));

    for child in prop.children() {
        push_md_rows(out, child, &path);
    }
}

/// One name per line.
pub fn render_names<S: AsRef<str>>(names: &[S]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(name.as_ref());
        out.push('\n');
    }
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

fn escape_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
