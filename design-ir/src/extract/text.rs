//! Text extractor: characters and typography specs for `TEXT` nodes.

use figma_client::types::RawNode;
use serde_json::{Map, Value, json};

use super::ExtractedProperty;

pub fn applies_to(node_type: &str) -> bool {
    node_type == "TEXT"
}

/// Contributes the inline `text` content and a shareable `textStyle`.
///
/// The characters are unique per node and stay inline; the typography
/// spec repeats across a document and is interned.
pub fn extract(node: &RawNode) -> Vec<ExtractedProperty> {
    let mut out = Vec::new();

    if let Some(characters) = &node.characters {
        if !characters.is_empty() {
            out.push(ExtractedProperty::inline("text", json!(characters)));
        }
    }

    if let Some(style) = &node.style {
        let mut spec = Map::new();
        if let Some(family) = &style.font_family {
            spec.insert("fontFamily".into(), json!(family));
        }
        if let Some(size) = style.font_size {
            spec.insert("fontSize".into(), json!(size));
        }
        if let Some(weight) = style.font_weight {
            spec.insert("fontWeight".into(), json!(weight));
        }
        if let Some(line_height) = style.line_height_px {
            spec.insert("lineHeightPx".into(), json!(line_height));
        }
        if let Some(spacing) = style.letter_spacing {
            spec.insert("letterSpacing".into(), json!(spacing));
        }
        if let Some(align) = &style.text_align_horizontal {
            spec.insert("textAlign".into(), json!(align));
        }
        if !spec.is_empty() {
            out.push(ExtractedProperty::shared("textStyle", Value::Object(spec)));
        }
    }

    out
}
