use figma_client::types::ImageNodeRef;
use serde::Deserialize;

/// Request body for exporting image assets from a file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportImagesRequest {
    pub file_key: String,
    /// Explicit export list; image candidates are discovered from a
    /// fresh fetch when absent.
    #[serde(default)]
    pub nodes: Option<Vec<ImageNodeRef>>,
    /// Directory the assets are written into; defaults to "./assets".
    #[serde(default)]
    pub local_path: Option<String>,
    /// Raster scale for PNG exports.
    #[serde(default)]
    pub png_scale: Option<f64>,
}
