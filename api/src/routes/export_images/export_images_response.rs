use serde::Serialize;

/// Response body listing the assets written to disk.
#[derive(Debug, Serialize)]
pub struct ExportImagesResponse {
    /// Human-readable manifest, one line per saved asset.
    pub manifest: String,
}
