//! Image-node selection: which IR nodes need a binary export.
//!
//! A node qualifies when its fills carry an image paint (exported as PNG)
//! or when its type can only be represented faithfully as vector output
//! (exported as SVG). Both entry points are pure and idempotent; malformed
//! or partially present data excludes the node instead of failing the scan.

use std::collections::BTreeSet;

use figma_client::types::{ImageFormat, ImageNodeRef};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::model::{GlobalStyleTable, SimplifiedDesign, SimplifiedNode};

/// Node types that have no faithful markup representation.
const VECTOR_ONLY_TYPES: [&str; 6] = [
    "VECTOR",
    "BOOLEAN_OPERATION",
    "LINE",
    "STAR",
    "POLYGON",
    "REGULAR_POLYGON",
];

/// Raster scale recommended for PNG exports.
const DEFAULT_PNG_SCALE: f64 = 2.0;

/// Scans an in-memory simplified design for exportable image nodes.
///
/// Deduplicated by node id, deterministic traversal order, empty result
/// when no candidates exist.
pub fn select_image_nodes(design: &SimplifiedDesign) -> Vec<ImageNodeRef> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for node in &design.nodes {
        visit_simplified(node, &design.global_vars, &mut seen, &mut out);
    }
    debug!(candidates = out.len(), "image node selection finished");
    out
}

fn visit_simplified(
    node: &SimplifiedNode,
    globals: &GlobalStyleTable,
    seen: &mut BTreeSet<String>,
    out: &mut Vec<ImageNodeRef>,
) {
    let fills = node
        .properties
        .get("fills")
        .map(|value| resolve_style(value, globals));
    if let Some(format) = classify(&node.node_type, fills) {
        push_candidate(&node.id, &node.name, format, seen, out);
    }
    for child in &node.children {
        visit_simplified(child, globals, seen, out);
    }
}

/// Scans already-serialized simplified output (JSON or YAML).
///
/// The lenient shape tolerates missing ids, names and tables; anything
/// that cannot be interpreted yields an empty list rather than an error.
pub fn select_image_nodes_from_text(text: &str) -> Vec<ImageNodeRef> {
    let parsed: Option<LenientDesign> = serde_json::from_str(text)
        .ok()
        .or_else(|| serde_yml::from_str(text).ok());

    let Some(design) = parsed else {
        debug!("serialized design did not parse; no image candidates");
        return Vec::new();
    };

    let globals = design.global_vars.unwrap_or_default();
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for node in &design.nodes {
        visit_lenient(node, &globals, &mut seen, &mut out);
    }
    out
}

fn visit_lenient(
    node: &LenientNode,
    globals: &GlobalStyleTable,
    seen: &mut BTreeSet<String>,
    out: &mut Vec<ImageNodeRef>,
) {
    if let Some(id) = &node.id {
        let fills = node
            .properties
            .get("fills")
            .map(|value| resolve_style(value, globals));
        if let Some(format) = classify(&node.node_type, fills) {
            let name = node.name.as_deref().unwrap_or(id);
            push_candidate(id, name, format, seen, out);
        }
    }
    for child in &node.children {
        visit_lenient(child, globals, seen, out);
    }
}

/// Shape-tolerant mirror of the serialized IR used by the text scan.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientDesign {
    #[serde(default)]
    nodes: Vec<LenientNode>,
    #[serde(default)]
    global_vars: Option<GlobalStyleTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientNode {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    node_type: String,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    #[serde(default)]
    children: Vec<LenientNode>,
}

/// Follows a style reference into the global table; inline values pass
/// through untouched.
fn resolve_style<'a>(value: &'a Value, globals: &'a GlobalStyleTable) -> &'a Value {
    if let Value::String(reference) = value {
        if let Some(style) = globals.get(reference) {
            return &style.value;
        }
    }
    value
}

/// Decides whether a node needs a binary export, and in which format.
fn classify(node_type: &str, fills: Option<&Value>) -> Option<ImageFormat> {
    if let Some(Value::Array(paints)) = fills {
        let has_image_paint = paints.iter().any(|paint| {
            paint.get("imageRef").is_some()
                || paint.get("type").and_then(Value::as_str) == Some("IMAGE")
        });
        if has_image_paint {
            return Some(ImageFormat::Png);
        }
    }
    if VECTOR_ONLY_TYPES.contains(&node_type) {
        return Some(ImageFormat::Svg);
    }
    None
}

fn push_candidate(
    id: &str,
    name: &str,
    format: ImageFormat,
    seen: &mut BTreeSet<String>,
    out: &mut Vec<ImageNodeRef>,
) {
    if !seen.insert(id.to_string()) {
        return;
    }
    let scale = match format {
        ImageFormat::Png => DEFAULT_PNG_SCALE,
        ImageFormat::Svg => 1.0,
    };
    out.push(ImageNodeRef {
        node_id: id.to_string(),
        file_name: asset_file_name(name, id, format),
        format,
        scale,
    });
}

/// Builds a filesystem-safe, collision-free asset file name.
fn asset_file_name(name: &str, id: &str, format: ImageFormat) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    let slug = if slug.is_empty() { "node" } else { slug.as_str() };
    let id_part: String = id.replace(':', "-");
    format!("{slug}-{id_part}.{}", format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::all_extractors;
    use crate::render::{OutputFormat, render};
    use crate::simplify::{SimplifyOptions, simplify_document};
    use figma_client::types::RawDocument;
    use serde_json::json;

    fn design_with_assets() -> SimplifiedDesign {
        let doc = RawDocument {
            name: "Assets".into(),
            last_modified: None,
            version: None,
            root: serde_json::from_value(json!({
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "1:1",
                    "name": "Page",
                    "type": "CANVAS",
                    "children": [
                        {
                            "id": "1:2",
                            "name": "Hero Photo",
                            "type": "RECTANGLE",
                            "fills": [{ "type": "IMAGE", "imageRef": "ref-1" }],
                            "children": []
                        },
                        {
                            "id": "1:3",
                            "name": "Logo Mark",
                            "type": "VECTOR",
                            "children": []
                        },
                        {
                            "id": "1:4",
                            "name": "Plain Box",
                            "type": "RECTANGLE",
                            "fills": [{ "type": "SOLID", "color": { "r": 0.5, "g": 0.5, "b": 0.5 } }],
                            "children": []
                        }
                    ]
                }]
            }))
            .unwrap(),
        };
        simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap()
    }

    #[test]
    fn selects_image_fills_and_vector_nodes() {
        let refs = select_image_nodes(&design_with_assets());
        assert_eq!(refs.len(), 2);

        let photo = refs.iter().find(|r| r.node_id == "1:2").unwrap();
        assert_eq!(photo.format, ImageFormat::Png);
        assert_eq!(photo.file_name, "hero-photo-1-2.png");

        let vector = refs.iter().find(|r| r.node_id == "1:3").unwrap();
        assert_eq!(vector.format, ImageFormat::Svg);
    }

    #[test]
    fn selection_is_idempotent() {
        let design = design_with_assets();
        let first = select_image_nodes(&design);
        let second = select_image_nodes(&design);
        assert_eq!(first, second);
    }

    #[test]
    fn text_scan_matches_in_memory_scan() {
        let design = design_with_assets();
        let expected = select_image_nodes(&design);

        for format in [OutputFormat::Yaml, OutputFormat::Json] {
            let text = render(&design, format).unwrap();
            let refs = select_image_nodes_from_text(&text);
            assert_eq!(refs, expected);
        }
    }

    #[test]
    fn malformed_text_yields_empty_list() {
        assert!(select_image_nodes_from_text("{{{ not valid").is_empty());
        assert!(select_image_nodes_from_text("").is_empty());
    }

    #[test]
    fn nodes_without_ids_are_excluded() {
        let text = r#"{ "nodes": [ { "type": "VECTOR" }, { "id": "9:9", "type": "VECTOR" } ] }"#;
        let refs = select_image_nodes_from_text(text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].node_id, "9:9");
    }

    #[test]
    fn duplicate_ids_are_deduplicated() {
        let text = r#"{ "nodes": [ { "id": "9:9", "type": "VECTOR" }, { "id": "9:9", "type": "VECTOR" } ] }"#;
        let refs = select_image_nodes_from_text(text);
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn no_candidates_is_an_empty_list() {
        let text = r#"{ "nodes": [ { "id": "1:1", "type": "FRAME" } ] }"#;
        assert!(select_image_nodes_from_text(text).is_empty());
    }
}
