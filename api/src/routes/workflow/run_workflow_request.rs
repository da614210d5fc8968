use serde::Deserialize;

/// Request body for the full design-to-component workflow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunWorkflowRequest {
    /// Figma file or design link (or a bare file key).
    pub figma_url: String,
    /// Component name; derived from the file name when absent.
    #[serde(default)]
    pub component_name: Option<String>,
    /// Where the caller intends to save the component (report only).
    #[serde(default)]
    pub output_path: Option<String>,
    /// Directory image assets are downloaded into.
    #[serde(default)]
    pub image_output_path: Option<String>,
    /// Whether to run the image handling stage; defaults to true and is
    /// forced off when the server skips image downloads.
    #[serde(default)]
    pub include_images: Option<bool>,
    /// Node traversal depth bound.
    #[serde(default)]
    pub depth: Option<u32>,
}
