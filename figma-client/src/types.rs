//! Raw Figma document types shared across the pipeline.
//!
//! These mirror the subset of the Figma REST wire format the extraction
//! layer reads. Unknown fields are ignored; optional fields tolerate
//! absence so a partially populated node never fails deserialization.
//! The raw tree is read-only input — nothing in the pipeline mutates it.

use serde::{Deserialize, Serialize};

/// Normalized fetch result for both the whole-file and the nodes endpoints.
///
/// `root` is the document node for a full-file fetch, or the requested
/// node's subtree when a node id was supplied.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Document name as reported by Figma.
    pub name: String,
    /// Last-modified marker (ISO timestamp string, passed through as-is).
    pub last_modified: Option<String>,
    /// Document version marker.
    pub version: Option<String>,
    /// Root of the fetched node tree.
    pub root: RawNode,
}

/// One node of the raw Figma tree.
///
/// Depth and fan-out are unbounded in principle; the simplifier bounds
/// traversal explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Figma omits `visible` for visible nodes.
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<RawNode>,

    // --- text ---
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub style: Option<RawTextStyle>,

    // --- paint ---
    #[serde(default)]
    pub fills: Vec<RawPaint>,
    #[serde(default)]
    pub strokes: Vec<RawPaint>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,

    // --- geometry ---
    #[serde(default)]
    pub absolute_bounding_box: Option<RawRect>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub opacity: Option<f64>,

    // --- auto-layout ---
    #[serde(default)]
    pub layout_mode: Option<String>,
    #[serde(default)]
    pub item_spacing: Option<f64>,

    // --- components ---
    #[serde(default)]
    pub component_id: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Axis-aligned bounding box in canvas coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A single fill or stroke paint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<RawColor>,
    /// Set for `IMAGE` paints; keys the binary behind the fill.
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub scale_mode: Option<String>,
    #[serde(default)]
    pub gradient_stops: Vec<RawGradientStop>,
}

/// Normalized RGBA color, channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

/// One stop of a gradient paint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawGradientStop {
    pub position: f64,
    pub color: RawColor,
}

/// Typography spec attached to `TEXT` nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_weight: Option<u32>,
    #[serde(default)]
    pub line_height_px: Option<f64>,
    #[serde(default)]
    pub letter_spacing: Option<f64>,
    #[serde(default)]
    pub text_align_horizontal: Option<String>,
}

/// Export format for a rasterized/vector asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Value expected by the Figma images endpoint `format` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// One node that must be exported as a binary asset.
///
/// Ephemeral: recomputed every run by the image-node selector, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNodeRef {
    /// Canonical node id (`1:2` form).
    pub node_id: String,
    /// File name to write the asset under, extension included.
    pub file_name: String,
    /// Export format requested from Figma.
    pub format: ImageFormat,
    /// Raster scale; ignored for SVG exports.
    pub scale: f64,
}

/// Manifest of assets written to disk by the downloader.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    pub saved: Vec<AssetRecord>,
}

/// One downloaded asset.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    /// Node the asset was rendered from.
    pub node_id: String,
    /// File name the asset was written under (relative to the destination).
    pub file_name: String,
    /// Render URL the bytes were fetched from.
    pub source_url: String,
}

impl AssetManifest {
    /// Human-readable summary used in workflow narration and reports.
    pub fn render_text(&self) -> String {
        if self.saved.is_empty() {
            return "no assets downloaded".to_string();
        }
        let mut lines = Vec::with_capacity(self.saved.len());
        for rec in &self.saved {
            lines.push(format!("{} <- node {}", rec.file_name, rec.node_id));
        }
        lines.join("\n")
    }
}
