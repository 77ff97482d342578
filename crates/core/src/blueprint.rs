use serde::Serialize;
use serde_json::Value;

use crate::collection::Collection;
use crate::resource::{self, MalformedItem, MethodEntry, Resource};

/// Format marker emitted as the first line of every document.
pub const FORMAT_MARKER: &str = "FORMAT: 1A";

const CONTENT_TYPE: &str = "application/json";
// Body JSON is indented 14 spaces per level; the re-added outer braces
// sit at 12.
const BODY_INDENT: &str = "              ";
const BRACE_INDENT: &str = "            ";

/// Generator configuration. The two historical generator behaviors are
/// configurations of the same walk, not separate code paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Group requests into one resource per derived path, per folder.
    /// When false, every (name, method) pair becomes its own entry in a
    /// single ungrouped stream.
    pub group_by_resource_path: bool,
    /// Status code for the fixed `+ Response` line.
    pub response_status_code: u16,
    /// Sort body object keys before pretty-printing.
    pub sort_body_keys: bool,
}

impl GeneratorConfig {
    /// Per-folder grouping, `+ Response 200`, bodies in source key order.
    pub fn grouped() -> Self {
        GeneratorConfig {
            group_by_resource_path: true,
            response_status_code: 200,
            sort_body_keys: false,
        }
    }

    /// Flat ungrouped stream, `+ Response 201`, sorted body keys.
    pub fn flat() -> Self {
        GeneratorConfig {
            group_by_resource_path: false,
            response_status_code: 201,
            sort_body_keys: true,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::grouped()
    }
}

/// A rendered document plus the items that were skipped along the way.
#[derive(Debug)]
pub struct RenderedBlueprint {
    pub markup: String,
    pub skipped: Vec<MalformedItem>,
}

/// Render a loaded collection as an API Blueprint document.
///
/// Output is strictly ordered: header once, then folders in collection
/// order, each folder fully emitted before the next starts. Malformed
/// items are skipped, never fatal.
pub fn render(collection: &Collection, config: &GeneratorConfig) -> RenderedBlueprint {
    let mut out = String::new();
    let mut skipped = Vec::new();

    render_header(&mut out, collection);

    if config.group_by_resource_path {
        // Group numbers are 1-based and never reset across the document.
        let mut group_num = 1usize;
        for item in &collection.items {
            // Non-folder top-level items are a no-op.
            if !item.is_folder() {
                continue;
            }

            let (resources, mut folder_skipped) = resource::group_by_path(&item.children);
            skipped.append(&mut folder_skipped);

            out.push_str(&format!("# Group {}.{}\n\n", group_num, item.name));
            group_num += 1;

            for res in resources.iter() {
                render_resource(&mut out, res, config);
            }
        }
    } else {
        let (resources, mut flat_skipped) = resource::flatten(&collection.items);
        skipped.append(&mut flat_skipped);
        for res in resources.iter() {
            render_resource(&mut out, res, config);
        }
    }

    RenderedBlueprint {
        markup: out,
        skipped,
    }
}

fn render_header(out: &mut String, collection: &Collection) {
    out.push_str(FORMAT_MARKER);
    out.push('\n');
    out.push_str(&format!("HOST: {}\n\n", collection.domain()));
    out.push_str(&format!("# {}\n\n", collection.title()));

    let description = collection.description_text();
    if !description.is_empty() {
        out.push_str(description);
        out.push('\n');
    }
}

fn render_resource(out: &mut String, resource: &Resource, config: &GeneratorConfig) {
    out.push_str(&format!("## {} [/{}]\n\n", resource.name, resource.path));
    for entry in &resource.methods {
        render_method(out, &resource.path, entry, config);
    }
}

fn render_method(out: &mut String, path: &str, entry: &MethodEntry, config: &GeneratorConfig) {
    out.push_str(&format!(
        "### {} {} [{}]\n\n",
        entry.method, path, entry.method
    ));

    if !entry.description.is_empty() {
        out.push_str(&entry.description);
        out.push_str("\n\n");
    }

    // Request blocks only exist for POST/PUT with a parseable body.
    if entry.method == "POST" || entry.method == "PUT" {
        if let Some(body) = entry.request_body.as_ref() {
            if let Some(block) = body_block(body, config.sort_body_keys) {
                out.push_str(&format!("+ Request ({CONTENT_TYPE})\n\n"));
                out.push_str("    + Body\n\n");
                out.push_str(&block);
                out.push_str("\n\n\n");
            }
        }
    }

    out.push_str(&format!(
        "+ Response {} ({CONTENT_TYPE})\n\n\n",
        config.response_status_code
    ));
}

/// Pretty-print a body value between re-added outer braces.
///
/// The JSON is dumped with a 14-space indent, its first and last
/// characters (the original braces) stripped, and fixed-indent braces
/// wrapped around the remainder. Serialization failures are swallowed;
/// the caller omits the whole block.
fn body_block(body: &Value, sort_keys: bool) -> Option<String> {
    let value = if sort_keys {
        sorted_value(body)
    } else {
        body.clone()
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(BODY_INDENT.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).ok()?;
    let dump = String::from_utf8(buf).ok()?;

    let inner = dump.get(1..dump.len().saturating_sub(1)).unwrap_or("");
    Some(format!("{BRACE_INDENT}{{{inner}{BRACE_INDENT}}}\n"))
}

/// Rebuild a value with object keys in sorted order, recursively.
fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, val)| (key.clone(), sorted_value(val)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_value).collect()),
        other => other.clone(),
    }
}
