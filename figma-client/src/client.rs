//! Figma REST API client (v1) for document trees and image exports.
//!
//! Endpoints used (as of 2025):
//!   * GET /files/:key?depth=:n
//!   * GET /files/:key/nodes?ids=:id&depth=:n
//!   * GET /images/:key?ids=:ids&format=:fmt&scale=:n
//!
//! Image export is a two-step flow: the images endpoint returns short-lived
//! render URLs, the binaries are fetched from those URLs afterwards.

use std::collections::HashMap;
use std::path::Path;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{FigmaClientResult, FigmaProviderError};
use crate::types::{
    AssetManifest, AssetRecord, ImageFormat, ImageNodeRef, RawDocument, RawNode,
};

/// Figma HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    base_api: String, // e.g. "https://api.figma.com/v1"
    token: String,    // "X-Figma-Token"
}

impl FigmaClient {
    /// Constructs a Figma client with a shared HTTP instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        debug!("Creating FigmaClient with base_api={}", base_api);
        Self {
            http,
            base_api,
            token,
        }
    }

    /// Fetches a whole file's node tree, optionally bounded by `depth`.
    pub async fn get_file(
        &self,
        file_key: &str,
        depth: Option<u32>,
    ) -> FigmaClientResult<RawDocument> {
        let url = format!("{}/files/{}", self.base_api, urlencoding::encode(file_key));
        debug!("Figma get_file: {} depth={:?}", url, depth);

        let mut request = self.http.get(url).header("X-Figma-Token", &self.token);
        if let Some(depth) = depth {
            request = request.query(&[("depth", depth.to_string())]);
        }

        let resp: FigmaFileDto = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(RawDocument {
            name: resp.name,
            last_modified: resp.last_modified,
            version: resp.version,
            root: resp.document,
        })
    }

    /// Fetches the subtree rooted at `node_id`, optionally bounded by `depth`.
    pub async fn get_nodes(
        &self,
        file_key: &str,
        node_id: &str,
        depth: Option<u32>,
    ) -> FigmaClientResult<RawDocument> {
        let url = format!(
            "{}/files/{}/nodes",
            self.base_api,
            urlencoding::encode(file_key)
        );
        debug!("Figma get_nodes: {} ids={} depth={:?}", url, node_id, depth);

        let mut query: Vec<(&str, String)> = vec![("ids", node_id.to_string())];
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }

        let resp: FigmaNodesDto = self
            .http
            .get(url)
            .header("X-Figma-Token", &self.token)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let envelope = resp.nodes.get(node_id).or_else(|| {
            // Figma keys the map by the canonical id; fall back to the only
            // entry when the requested spelling differs.
            (resp.nodes.len() == 1).then(|| resp.nodes.values().next()).flatten()
        });

        let Some(envelope) = envelope else {
            return Err(FigmaProviderError::InvalidResponse(format!(
                "nodes response is missing entry for {node_id}"
            ))
            .into());
        };

        Ok(RawDocument {
            name: resp.name,
            last_modified: resp.last_modified,
            version: resp.version,
            root: envelope.document.clone(),
        })
    }

    /// Resolves render URLs for a set of nodes in one export format.
    ///
    /// Figma returns `null` for nodes it declined to render; those entries
    /// are preserved so callers can narrate the gap.
    pub async fn get_image_urls(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: ImageFormat,
        scale: f64,
    ) -> FigmaClientResult<HashMap<String, Option<String>>> {
        if node_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/images/{}", self.base_api, urlencoding::encode(file_key));
        debug!(
            "Figma get_image_urls: {} ids={} format={} scale={}",
            url,
            node_ids.len(),
            format.as_str(),
            scale
        );

        let resp: FigmaImagesDto = self
            .http
            .get(url)
            .header("X-Figma-Token", &self.token)
            .query(&[
                ("ids", node_ids.join(",")),
                ("format", format.as_str().to_string()),
                ("scale", scale.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.err {
            return Err(FigmaProviderError::Api(err).into());
        }

        Ok(resp.images)
    }

    /// Downloads rendered assets for `refs` into `dest_dir`.
    ///
    /// Nodes Figma declined to render are skipped with a warning rather
    /// than failing the whole batch; transport and filesystem errors still
    /// surface as errors.
    pub async fn download_assets(
        &self,
        file_key: &str,
        refs: &[ImageNodeRef],
        dest_dir: &Path,
        png_scale: f64,
    ) -> FigmaClientResult<AssetManifest> {
        debug!(
            "Figma download_assets: file={} refs={} dest={}",
            file_key,
            refs.len(),
            dest_dir.display()
        );

        let mut manifest = AssetManifest::default();
        if refs.is_empty() {
            return Ok(manifest);
        }

        tokio::fs::create_dir_all(dest_dir).await?;

        for format in [ImageFormat::Png, ImageFormat::Svg] {
            let batch: Vec<&ImageNodeRef> =
                refs.iter().filter(|r| r.format == format).collect();
            if batch.is_empty() {
                continue;
            }

            let ids: Vec<String> = batch.iter().map(|r| r.node_id.clone()).collect();
            let scale = match format {
                ImageFormat::Png => png_scale,
                ImageFormat::Svg => 1.0,
            };
            let urls = self.get_image_urls(file_key, &ids, format, scale).await?;

            for image_ref in batch {
                let Some(Some(render_url)) = urls.get(&image_ref.node_id) else {
                    warn!(
                        "Figma returned no render url for node {}; skipping",
                        image_ref.node_id
                    );
                    continue;
                };

                let bytes = self
                    .http
                    .get(render_url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;

                let target = dest_dir.join(&image_ref.file_name);
                tokio::fs::write(&target, &bytes).await?;
                debug!(
                    "Asset written: {} ({} bytes)",
                    target.display(),
                    bytes.len()
                );

                manifest.saved.push(AssetRecord {
                    node_id: image_ref.node_id.clone(),
                    file_name: image_ref.file_name.clone(),
                    source_url: render_url.clone(),
                });
            }
        }

        Ok(manifest)
    }
}

// ===== Wire DTOs (Figma REST v1) =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FigmaFileDto {
    name: String,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    version: Option<String>,
    document: RawNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FigmaNodesDto {
    name: String,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    version: Option<String>,
    nodes: HashMap<String, FigmaNodeEnvelopeDto>,
}

#[derive(Debug, Deserialize)]
struct FigmaNodeEnvelopeDto {
    document: RawNode,
}

#[derive(Debug, Deserialize)]
struct FigmaImagesDto {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    images: HashMap<String, Option<String>>,
}
