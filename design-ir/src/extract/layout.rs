//! Layout extractor: bounding boxes and auto-layout containers.

use figma_client::types::RawNode;
use serde_json::{Map, Value, json};

use super::ExtractedProperty;

/// Builds one shareable `layout` property from the node's geometry.
///
/// Identical frames (same size, same auto-layout settings) are common in
/// real documents, which is what makes this composite worth interning.
pub fn extract(node: &RawNode) -> Vec<ExtractedProperty> {
    let mut layout = Map::new();

    if let Some(bb) = &node.absolute_bounding_box {
        layout.insert("x".into(), json!(bb.x));
        layout.insert("y".into(), json!(bb.y));
        layout.insert("width".into(), json!(bb.width));
        layout.insert("height".into(), json!(bb.height));
    }

    if let Some(mode) = &node.layout_mode {
        if mode != "NONE" {
            layout.insert("mode".into(), json!(mode));
            if let Some(spacing) = node.item_spacing {
                layout.insert("itemSpacing".into(), json!(spacing));
            }
        }
    }

    if layout.is_empty() {
        return Vec::new();
    }

    vec![ExtractedProperty::shared("layout", Value::Object(layout))]
}
