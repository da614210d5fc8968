use serde::Deserialize;

/// Request body for generating a React component from design data the
/// caller already holds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateComponentRequest {
    /// Serialized simplified design (YAML or JSON).
    pub design_data: String,
    /// Asset manifest text to embed in the component scaffold.
    #[serde(default)]
    pub image_manifest: Option<String>,
    /// Component name; a fallback is used when absent.
    #[serde(default)]
    pub component_name: Option<String>,
}
