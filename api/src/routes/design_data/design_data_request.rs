use serde::Deserialize;

/// Request body for fetching the simplified design of a file or node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDataRequest {
    /// Figma file key, the segment after `file/` or `design/` in a URL.
    pub file_key: String,
    /// Node to fetch; the whole file is fetched when absent.
    #[serde(default)]
    pub node_id: Option<String>,
    /// Traversal depth bound.
    #[serde(default)]
    pub depth: Option<u32>,
}
