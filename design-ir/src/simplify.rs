//! Depth-bounded simplification of raw Figma trees into the IR.
//!
//! The walk is a plain depth-first traversal with an explicit depth
//! counter threaded through each call, so adversarially deep documents
//! cannot blow the stack beyond the configured bound.

use figma_client::types::{RawDocument, RawNode};
use tracing::debug;

use crate::errors::{IrError, IrResult};
use crate::extract::Extractor;
use crate::model::{DesignMetadata, GlobalStyleTable, SimplifiedDesign, SimplifiedNode};

/// Traversal options.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyOptions {
    /// Maximum depth to descend below the top-level nodes. Nodes at the
    /// bound are emitted as childless placeholders.
    pub max_depth: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

/// Simplifies a fetched document into the deduplicated IR.
///
/// Top-level nodes are the document root's children when the root is the
/// synthetic `DOCUMENT` node (whole-file fetch), or the root itself when a
/// specific node was fetched. Invisible nodes are dropped. Each visited
/// node is offered to every extractor in registration order; on property
/// name collision the later-registered extractor wins.
///
/// Deterministic: the same raw tree and extractor set always produce
/// byte-identical serialized output.
pub fn simplify_document(
    doc: &RawDocument,
    extractors: &[Extractor],
    options: SimplifyOptions,
) -> IrResult<SimplifiedDesign> {
    let mut globals = GlobalStyleTable::default();

    let roots: Vec<&RawNode> = if doc.root.node_type == "DOCUMENT" {
        doc.root.children.iter().collect()
    } else {
        vec![&doc.root]
    };

    let mut nodes = Vec::new();
    for root in roots {
        if !root.visible {
            continue;
        }
        nodes.push(simplify_node(root, extractors, 0, options, &mut globals));
    }

    if nodes.is_empty() {
        return Err(IrError::EmptyDocument);
    }

    debug!(
        nodes = nodes.len(),
        styles = globals.len(),
        "document simplified"
    );

    Ok(SimplifiedDesign {
        metadata: DesignMetadata {
            name: doc.name.clone(),
            last_modified: doc.last_modified.clone(),
            version: doc.version.clone(),
        },
        nodes,
        global_vars: globals,
    })
}

fn simplify_node(
    raw: &RawNode,
    extractors: &[Extractor],
    depth: usize,
    options: SimplifyOptions,
    globals: &mut GlobalStyleTable,
) -> SimplifiedNode {
    let mut node = SimplifiedNode {
        id: raw.id.clone(),
        name: raw.name.clone(),
        node_type: raw.node_type.clone(),
        properties: Default::default(),
        children: Vec::new(),
    };

    for extractor in extractors {
        if !extractor.applies_to(&raw.node_type) {
            continue;
        }
        for prop in extractor.extract(raw) {
            let value = if prop.shareable {
                let id = globals.intern(prop.name, prop.value);
                serde_json::Value::String(id)
            } else {
                prop.value
            };
            // Last write wins on name collisions (documented extractor
            // contract).
            node.properties.insert(prop.name.to_string(), value);
        }
    }

    if depth < options.max_depth {
        for child in &raw.children {
            if !child.visible {
                continue;
            }
            node.children
                .push(simplify_node(child, extractors, depth + 1, options, globals));
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::all_extractors;
    use crate::render::{OutputFormat, render};
    use figma_client::types::RawDocument;
    use serde_json::json;

    fn doc_from_json(root: serde_json::Value) -> RawDocument {
        RawDocument {
            name: "Test File".into(),
            last_modified: Some("2026-01-01T00:00:00Z".into()),
            version: Some("42".into()),
            root: serde_json::from_value(root).expect("raw node json"),
        }
    }

    fn sample_doc() -> RawDocument {
        doc_from_json(json!({
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "1:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [
                    {
                        "id": "1:2",
                        "name": "Card",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": 0.0, "y": 0.0, "width": 320.0, "height": 200.0 },
                        "fills": [{ "type": "SOLID", "color": { "r": 1.0, "g": 1.0, "b": 1.0 } }],
                        "children": [{
                            "id": "1:3",
                            "name": "Title",
                            "type": "TEXT",
                            "characters": "Hello",
                            "style": { "fontFamily": "Inter", "fontSize": 16.0 },
                            "children": []
                        }]
                    },
                    {
                        "id": "1:4",
                        "name": "Card Copy",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": 400.0, "y": 0.0, "width": 320.0, "height": 200.0 },
                        "fills": [{ "type": "SOLID", "color": { "r": 1.0, "g": 1.0, "b": 1.0 } }],
                        "children": []
                    }
                ]
            }]
        }))
    }

    fn count_nodes(node: &SimplifiedNode) -> usize {
        1 + node.children.iter().map(count_nodes).sum::<usize>()
    }

    #[test]
    fn tree_is_isomorphic_within_depth_bound() {
        let doc = sample_doc();
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();

        // Canvas + two frames + one text node.
        assert_eq!(design.nodes.len(), 1);
        assert_eq!(count_nodes(&design.nodes[0]), 4);
        assert_eq!(design.nodes[0].children[0].id, "1:2");
        assert_eq!(design.nodes[0].children[0].children[0].id, "1:3");
    }

    #[test]
    fn depth_bound_emits_childless_placeholder() {
        let doc = sample_doc();
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions { max_depth: 1 }).unwrap();

        // Frames at depth 1 survive but their children are not descended.
        let canvas = &design.nodes[0];
        assert_eq!(canvas.children.len(), 2);
        assert!(canvas.children[0].children.is_empty());
        // The placeholder still carries its extracted properties.
        assert!(canvas.children[0].properties.contains_key("layout"));
    }

    #[test]
    fn invisible_nodes_are_dropped() {
        let doc = doc_from_json(json!({
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "1:1",
                "name": "Page",
                "type": "CANVAS",
                "children": [
                    { "id": "1:2", "name": "Shown", "type": "FRAME", "children": [] },
                    { "id": "1:3", "name": "Hidden", "type": "FRAME", "visible": false, "children": [] }
                ]
            }]
        }));
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();
        assert_eq!(design.nodes[0].children.len(), 1);
        assert_eq!(design.nodes[0].children[0].id, "1:2");
    }

    #[test]
    fn identical_styles_share_one_global_entry() {
        let doc = sample_doc();
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();

        let canvas = &design.nodes[0];
        let first = canvas.children[0].properties.get("fills").unwrap();
        let second = canvas.children[1].properties.get("fills").unwrap();
        assert_eq!(first, second);

        let id = first.as_str().unwrap();
        assert!(id.starts_with("fills_"));
        assert_eq!(design.global_vars.get(id).unwrap().ref_count, 2);
    }

    #[test]
    fn metadata_comes_from_the_document_root() {
        let doc = sample_doc();
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();
        assert_eq!(design.metadata.name, "Test File");
        assert_eq!(
            design.metadata.last_modified.as_deref(),
            Some("2026-01-01T00:00:00Z")
        );
        assert_eq!(design.metadata.version.as_deref(), Some("42"));
    }

    #[test]
    fn simplify_is_deterministic() {
        let doc = sample_doc();
        let first =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();
        let second =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();

        let first_yaml = render(&first, OutputFormat::Yaml).unwrap();
        let second_yaml = render(&second, OutputFormat::Yaml).unwrap();
        assert_eq!(first_yaml, second_yaml);
    }

    #[test]
    fn empty_document_is_an_error() {
        let doc = doc_from_json(json!({
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": []
        }));
        let result = simplify_document(&doc, &all_extractors(), SimplifyOptions::default());
        assert!(matches!(result, Err(IrError::EmptyDocument)));
    }

    #[test]
    fn non_document_root_becomes_the_single_top_node() {
        let doc = doc_from_json(json!({
            "id": "7:1",
            "name": "Hero",
            "type": "FRAME",
            "children": []
        }));
        let design =
            simplify_document(&doc, &all_extractors(), SimplifyOptions::default()).unwrap();
        assert_eq!(design.nodes.len(), 1);
        assert_eq!(design.nodes[0].id, "7:1");
    }
}
