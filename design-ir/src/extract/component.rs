//! Component extractor: instance/component linkage.

use figma_client::types::RawNode;
use serde_json::json;

use super::ExtractedProperty;

pub fn applies_to(node_type: &str) -> bool {
    matches!(node_type, "INSTANCE" | "COMPONENT" | "COMPONENT_SET")
}

/// Contributes the inline `componentId` an instance points at.
pub fn extract(node: &RawNode) -> Vec<ExtractedProperty> {
    match &node.component_id {
        Some(component_id) => vec![ExtractedProperty::inline(
            "componentId",
            json!(component_id),
        )],
        None => Vec::new(),
    }
}
