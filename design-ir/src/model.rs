//! Simplified IR model: nodes, metadata and the global style table.
//!
//! Determinism is a hard requirement here: every mapping is a `BTreeMap`
//! and style ids are content-addressed, so the serialized IR is
//! byte-identical across runs regardless of traversal or insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Document-level metadata, extracted once from the fetched root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// IR counterpart of a raw node.
///
/// The simplified tree is isomorphic in shape to the raw tree truncated at
/// the configured depth limit: one simplified node per raw node within the
/// bound, acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Extracted properties. Shareable values hold a style reference id
    /// (a key into [`GlobalStyleTable`]) instead of the inlined value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SimplifiedNode>,
}

/// One deduplicated style value plus the number of nodes referencing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyle {
    pub value: Value,
    pub ref_count: u32,
}

/// Content-addressed table of shared style values.
///
/// Write-once per extraction run: entries are only looked up or added,
/// never deleted or mutated (apart from the reference counter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStyleTable {
    pub styles: BTreeMap<String, GlobalStyle>,
}

impl GlobalStyleTable {
    /// Interns `value` under a content-derived id and returns that id.
    ///
    /// Two structurally identical values always collapse to the same entry
    /// within one run; the fingerprint is computed over the canonical JSON
    /// encoding (serde_json maps serialize with sorted keys), so it does
    /// not depend on traversal or insertion order.
    pub fn intern(&mut self, prefix: &str, value: Value) -> String {
        let id = format!("{}_{}", prefix, &fingerprint(&value)[..8]);
        self.styles
            .entry(id.clone())
            .and_modify(|style| style.ref_count += 1)
            .or_insert(GlobalStyle {
                value,
                ref_count: 1,
            });
        id
    }

    pub fn get(&self, id: &str) -> Option<&GlobalStyle> {
        self.styles.get(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Compute a lowercase hex SHA-256 of a JSON value's canonical encoding.
fn fingerprint(value: &Value) -> String {
    let mut h = Sha256::new();
    h.update(value.to_string().as_bytes());
    format!("{:x}", h.finalize())
}

/// Full extraction output: metadata + simplified tree + shared styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedDesign {
    pub metadata: DesignMetadata,
    pub nodes: Vec<SimplifiedNode>,
    pub global_vars: GlobalStyleTable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_content_collapses_to_one_entry() {
        let mut table = GlobalStyleTable::default();
        let a = table.intern("fill", json!({ "colors": ["#FF0000"] }));
        let b = table.intern("fill", json!({ "colors": ["#FF0000"] }));
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&a).unwrap().ref_count, 2);
    }

    #[test]
    fn differing_content_maps_to_distinct_entries() {
        let mut table = GlobalStyleTable::default();
        let a = table.intern("fill", json!({ "colors": ["#FF0000"] }));
        let b = table.intern("fill", json!({ "colors": ["#00FF00"] }));
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn id_carries_property_prefix() {
        let mut table = GlobalStyleTable::default();
        let id = table.intern("textStyle", json!({ "fontFamily": "Inter" }));
        assert!(id.starts_with("textStyle_"));
        assert_eq!(id.len(), "textStyle_".len() + 8);
    }

    #[test]
    fn fingerprint_is_independent_of_construction_order() {
        // Maps built in different insertion orders serialize identically.
        let left = json!({ "a": 1, "b": 2 });
        let mut right = serde_json::Map::new();
        right.insert("b".into(), json!(2));
        right.insert("a".into(), json!(1));
        let right = Value::Object(right);

        let mut table = GlobalStyleTable::default();
        let l = table.intern("layout", left);
        let r = table.intern("layout", right);
        assert_eq!(l, r);
    }
}
