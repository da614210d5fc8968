//! Named operations exposed to the dispatch boundary.
//!
//! Each operation comes in two layers: a fallible core returning
//! [`WorkflowResult`] so callers that speak HTTP can map errors to
//! precise statuses, and a [`ToolReply`] wrapper that folds failures into
//! the reply for callers that only understand the text contract. Neither
//! layer exposes internal stage structure.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use component_gen::{ComponentSpec, generate_component};
use design_ir::{
    OutputFormat, SimplifiedDesign, SimplifyOptions, all_extractors, render,
    select_image_nodes, simplify_document,
};
use figma_client::FigmaClient;
use figma_client::types::ImageNodeRef;

use crate::errors::WorkflowResult;
use crate::stage::ToolReply;

/// Depth bound applied when the caller does not specify one.
pub const DEFAULT_DEPTH: u32 = 10;

/// Raster scale for PNG exports when the caller does not specify one.
pub const DEFAULT_PNG_SCALE: f64 = 2.0;

/// Parameters for the fetch + simplify operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDataParams {
    /// File key, often found in a Figma URL after the file/design segment.
    pub file_key: String,
    /// Node to fetch; the whole file is fetched when absent.
    #[serde(default)]
    pub node_id: Option<String>,
    /// Traversal depth bound; defaults to 10.
    #[serde(default)]
    pub depth: Option<u32>,
}

/// Parameters for the image export operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportImagesParams {
    pub file_key: String,
    /// Explicit export list; discovered from a fresh fetch when absent.
    #[serde(default)]
    pub nodes: Option<Vec<ImageNodeRef>>,
    /// Directory the assets are written into.
    pub local_path: String,
    #[serde(default)]
    pub png_scale: Option<f64>,
}

/// Parameters for the component generation operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateComponentParams {
    /// Serialized simplified design (YAML or JSON).
    pub design_data: String,
    #[serde(default)]
    pub image_manifest: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
}

/// Fetches and simplifies a document or node subtree.
pub(crate) async fn fetch_simplified(
    client: &FigmaClient,
    file_key: &str,
    node_id: Option<&str>,
    depth: Option<u32>,
) -> WorkflowResult<SimplifiedDesign> {
    let raw = match node_id {
        Some(node_id) => client.get_nodes(file_key, node_id, depth).await?,
        None => client.get_file(file_key, depth).await?,
    };

    let options = SimplifyOptions {
        max_depth: depth.unwrap_or(DEFAULT_DEPTH) as usize,
    };
    let design = simplify_document(&raw, &all_extractors(), options)?;
    Ok(design)
}

/// Fallible core of [`get_design_data`]: fetch + simplify + render.
pub async fn fetch_design_text(
    client: &FigmaClient,
    params: &DesignDataParams,
    format: OutputFormat,
) -> WorkflowResult<String> {
    debug!(file_key = %params.file_key, node_id = ?params.node_id, "fetch_design_text");

    let design = fetch_simplified(
        client,
        &params.file_key,
        params.node_id.as_deref(),
        params.depth,
    )
    .await?;
    Ok(render(&design, format)?)
}

/// Fetch + simplify + render, as one named operation.
pub async fn get_design_data(
    client: &FigmaClient,
    params: &DesignDataParams,
    format: OutputFormat,
) -> ToolReply {
    match fetch_design_text(client, params, format).await {
        Ok(text) => ToolReply::text(text),
        Err(err) => ToolReply::error(vec![format!("Error fetching file: {err}")]),
    }
}

/// Fallible core of [`export_images`]: discover (when needed), download,
/// and describe the saved assets.
pub async fn export_design_images(
    client: &FigmaClient,
    params: &ExportImagesParams,
) -> WorkflowResult<String> {
    debug!(file_key = %params.file_key, path = %params.local_path, "export_design_images");

    let refs = match &params.nodes {
        Some(nodes) => nodes.clone(),
        None => {
            let design = fetch_simplified(client, &params.file_key, None, None).await?;
            select_image_nodes(&design)
        }
    };

    if refs.is_empty() {
        return Ok("no image assets found".to_string());
    }

    let manifest = client
        .download_assets(
            &params.file_key,
            &refs,
            Path::new(&params.local_path),
            params.png_scale.unwrap_or(DEFAULT_PNG_SCALE),
        )
        .await?;
    Ok(manifest.render_text())
}

/// Exports image assets for a file, discovering candidates when the
/// caller does not name them.
pub async fn export_images(client: &FigmaClient, params: &ExportImagesParams) -> ToolReply {
    match export_design_images(client, params).await {
        Ok(text) => ToolReply::text(text),
        Err(err) => ToolReply::error(vec![format!("Error exporting images: {err}")]),
    }
}

/// Fallible core of [`generate_component_reply`].
pub fn generate_component_source(params: &GenerateComponentParams) -> WorkflowResult<String> {
    let spec = ComponentSpec {
        name: params.component_name.as_deref().unwrap_or("FigmaComponent"),
        design_data: &params.design_data,
        image_manifest: params.image_manifest.as_deref().unwrap_or(""),
    };
    Ok(generate_component(&spec)?)
}

/// Generates component source from already-serialized design data.
pub fn generate_component_reply(params: &GenerateComponentParams) -> ToolReply {
    match generate_component_source(params) {
        Ok(source) => ToolReply::text(source),
        Err(err) => ToolReply::error(vec![format!("Error generating component: {err}")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_component_reply_wraps_success() {
        let reply = generate_component_reply(&GenerateComponentParams {
            design_data: "metadata:\n  name: Demo".into(),
            image_manifest: None,
            component_name: Some("Demo Card".into()),
        });
        assert!(!reply.is_error);
        assert!(reply.content[0].contains("export const DemoCard"));
    }

    #[test]
    fn generate_component_reply_folds_errors_into_the_reply() {
        let reply = generate_component_reply(&GenerateComponentParams {
            design_data: "".into(),
            image_manifest: None,
            component_name: None,
        });
        assert!(reply.is_error);
        assert!(reply.content[0].contains("Error generating component"));
    }

    #[tokio::test]
    async fn export_with_an_empty_node_list_touches_nothing() {
        // Explicit empty list short-circuits before any network or
        // filesystem access.
        let client = FigmaClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9".to_string(),
            "test-token".to_string(),
        );
        let params = ExportImagesParams {
            file_key: "ABC123".into(),
            nodes: Some(Vec::new()),
            local_path: "./assets".into(),
            png_scale: None,
        };
        let text = export_design_images(&client, &params).await.unwrap();
        assert_eq!(text, "no image assets found");
    }
}
