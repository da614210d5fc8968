//! Public entry for the design-to-component workflow pipeline.
//!
//! Single high-level function to run the whole pipeline for one Figma
//! reference.
//!
//! 1) **Stage 1 — Resolve**
//!    - Parse the user-supplied URL/key into a canonical locator
//!    - An unresolvable reference aborts the run with a user-facing error
//!
//! 2) **Stage 2 — Fetch + Extract**
//!    - Fetch the raw node tree (whole file or one subtree)
//!    - Simplify it into the deduplicated IR and render YAML/JSON
//!    - Any fetch or extraction error is fatal
//!
//! 3) **Stage 3 — Image handling (skippable, degradable)**
//!    - Discover exportable image nodes by scanning the rendered IR text
//!    - Download assets; a failed download degrades the run with a
//!      warning and a placeholder manifest instead of aborting
//!
//! 4) **Stage 4 — Code generation**
//!    - Generate the React component from IR + manifest; failure is fatal
//!
//! 5) **Stage 5 — Assemble**
//!    - Build the final narration + payload report with usage notes
//!
//! Every stage runs through [`StageOutcome`]/[`apply_outcome`], so
//! narration accumulates in order regardless of the tag and the returned
//! report documents exactly what happened, even on partial failure.
//! Fatal failure short-circuits the remaining stages; no error ever
//! crosses this crate's boundary as `Err` — callers always receive a
//! [`ToolReply`].
//!
//! The pipeline uses `tracing` for debug logging and avoids `async-trait`
//! and heap trait objects. It relies on plain `async fn` and enum
//! dispatch over the thin Figma client.

pub mod errors;
pub mod ops;
pub mod stage;

use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use tracing::debug;

use component_gen::{ComponentSpec, generate_component, sanitize_component_name};
use design_ir::{OutputFormat, SimplifiedDesign, render, select_image_nodes_from_text};
use figma_client::types::AssetManifest;
use figma_client::{DesignLocator, FigmaClient, FigmaClientError, smart_parse};

use crate::errors::{WorkflowError, WorkflowResult};
use crate::stage::{StageOutcome, ToolReply, apply_outcome};

pub use ops::{
    DEFAULT_DEPTH, DEFAULT_PNG_SCALE, DesignDataParams, ExportImagesParams,
    GenerateComponentParams, export_design_images, export_images, fetch_design_text,
    generate_component_reply, generate_component_source, get_design_data,
};
pub use stage::{StageOutcome as WorkflowStageOutcome, ToolReply as WorkflowToolReply};

/// Parameters for the orchestrating workflow operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowParams {
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
    /// Whether to run the image handling stage at all.
    #[serde(default = "default_true")]
    pub include_images: bool,
    /// Node traversal depth bound.
    #[serde(default)]
    pub depth: Option<u32>,
}

fn default_true() -> bool {
    true
}

/// Fetch + extract output carried between stages.
struct FetchedDesign {
    design: SimplifiedDesign,
    ir_text: String,
}

/// Runs stages **1–5** for a single Figma reference and returns the
/// consolidated report.
///
/// # Logging
/// Emits `DEBUG` logs per stage:
/// - `stage1: locator resolved`
/// - `stage2: design fetched + simplified (nodes=N, styles=M)`
/// - `stage3: image handling (candidates=K)`
/// - `stage4: component generated (bytes=B)`
pub async fn run_workflow(
    client: &FigmaClient,
    params: &WorkflowParams,
    format: OutputFormat,
) -> ToolReply {
    let t0 = Instant::now();
    let mut steps: Vec<String> = Vec::new();

    // ---------------------------
    // Stage 1: resolve the locator
    // ---------------------------
    let locator = match apply_outcome(&mut steps, resolve_stage(&params.figma_url)) {
        Ok(locator) => locator,
        Err(message) => return ToolReply::error(with_final(steps, message)),
    };
    debug!(
        file_key = %locator.file_key,
        node_id = ?locator.node_id,
        "stage1: locator resolved"
    );

    // ---------------------------
    // Stage 2: fetch + extract
    // ---------------------------
    steps.push("Fetching Figma design data...".to_string());
    let fetch_outcome = match fetch_stage(client, &locator, params.depth, format).await {
        Ok(fetched) => StageOutcome::Success {
            value: fetched,
            note: Some("Figma design data fetched successfully".to_string()),
        },
        Err(err) => StageOutcome::Fatal(format!("Failed to fetch Figma data: {err}")),
    };
    let fetched = match apply_outcome(&mut steps, fetch_outcome) {
        Ok(fetched) => fetched,
        Err(message) => return ToolReply::error(with_final(steps, message)),
    };
    debug!(
        nodes = fetched.design.nodes.len(),
        styles = fetched.design.global_vars.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "stage2: design fetched + simplified"
    );

    // -----------------------------------------
    // Stage 3: image handling (skippable)
    // -----------------------------------------
    let image_outcome = if params.include_images {
        steps.push("Analyzing and downloading image assets...".to_string());
        image_stage(client, &locator, &fetched, params).await
    } else {
        StageOutcome::Success {
            value: "image downloads skipped".to_string(),
            note: Some("Image download step skipped".to_string()),
        }
    };
    let image_manifest = match apply_outcome(&mut steps, image_outcome) {
        Ok(manifest) => manifest,
        // Image handling never produces a fatal outcome; this arm exists
        // for the driver contract.
        Err(message) => return ToolReply::error(with_final(steps, message)),
    };

    // ----------------------------------------------------
    // Stage 4: component generation
    // ----------------------------------------------------
    steps.push("Generating React component code...".to_string());
    let component_name = resolve_component_name(params, &locator);
    let spec = ComponentSpec {
        name: &component_name,
        design_data: &fetched.ir_text,
        image_manifest: &image_manifest,
    };
    let codegen_outcome = match generate_component(&spec) {
        Ok(source) => StageOutcome::Success {
            value: source,
            note: Some("React component code generated".to_string()),
        },
        Err(err) => StageOutcome::Fatal(format!("Component generation failed: {err}")),
    };
    let source = match apply_outcome(&mut steps, codegen_outcome) {
        Ok(source) => source,
        Err(message) => return ToolReply::error(with_final(steps, message)),
    };
    debug!(
        component = %component_name,
        bytes = source.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "stage4: component generated"
    );

    // ----------------------------------------------------
    // Stage 5: assemble the final report
    // ----------------------------------------------------
    assemble_report(&steps, &locator, params, &component_name, &source)
}

/// Resolves the user-supplied reference; unresolvable input is fatal.
fn resolve_stage(input: &str) -> StageOutcome<DesignLocator> {
    let locator = smart_parse(input, None);
    if locator.is_valid {
        StageOutcome::Success {
            value: locator,
            note: None,
        }
    } else {
        StageOutcome::Fatal(WorkflowError::InvalidLocator(input.to_string()).to_string())
    }
}

async fn fetch_stage(
    client: &FigmaClient,
    locator: &DesignLocator,
    depth: Option<u32>,
    format: OutputFormat,
) -> WorkflowResult<FetchedDesign> {
    let design = ops::fetch_simplified(
        client,
        &locator.file_key,
        locator.node_id.as_deref(),
        depth,
    )
    .await?;
    let ir_text = render(&design, format)?;

    Ok(FetchedDesign { design, ir_text })
}

/// Discovers image candidates by scanning the rendered IR text (the same
/// serialized form the code generator receives) and downloads them.
async fn image_stage(
    client: &FigmaClient,
    locator: &DesignLocator,
    fetched: &FetchedDesign,
    params: &WorkflowParams,
) -> StageOutcome<String> {
    let refs = select_image_nodes_from_text(&fetched.ir_text);
    debug!(candidates = refs.len(), "stage3: image handling");

    if refs.is_empty() {
        return StageOutcome::Success {
            value: "no image assets found".to_string(),
            note: Some("No image assets found in the design".to_string()),
        };
    }

    let dest = params
        .image_output_path
        .clone()
        .unwrap_or_else(|| "./assets".to_string());

    let downloaded = client
        .download_assets(
            &locator.file_key,
            &refs,
            Path::new(&dest),
            DEFAULT_PNG_SCALE,
        )
        .await;

    download_outcome(downloaded)
}

/// Folds the asset-download result into a stage outcome.
///
/// Download failure is non-fatal by design: the run continues with a
/// placeholder manifest and a recorded warning.
fn download_outcome(result: Result<AssetManifest, FigmaClientError>) -> StageOutcome<String> {
    match result {
        Ok(manifest) => StageOutcome::Success {
            note: Some(format!(
                "Image assets downloaded ({} files)",
                manifest.saved.len()
            )),
            value: manifest.render_text(),
        },
        Err(err) => StageOutcome::Degraded {
            fallback: "image download failed".to_string(),
            warning: format!(
                "Image download failed ({err}); continuing with component generation"
            ),
        },
    }
}

fn resolve_component_name(params: &WorkflowParams, locator: &DesignLocator) -> String {
    if let Some(name) = &params.component_name {
        return sanitize_component_name(name);
    }
    if let Some(file_name) = &locator.file_name {
        return sanitize_component_name(file_name);
    }
    "FigmaComponent".to_string()
}

/// Builds the consolidated success report.
fn assemble_report(
    steps: &[String],
    locator: &DesignLocator,
    params: &WorkflowParams,
    component_name: &str,
    source: &str,
) -> ToolReply {
    let mut report = String::new();
    report.push_str("# Figma to React component workflow\n\n");

    report.push_str("## Steps\n");
    for step in steps {
        report.push_str(&format!("- {step}\n"));
    }

    report.push_str("\n## Component\n");
    report.push_str(&format!("- **Name**: {component_name}\n"));
    report.push_str(&format!(
        "- **Figma file**: {}\n",
        locator.file_name.as_deref().unwrap_or("Unknown")
    ));
    report.push_str(&format!("- **File key**: {}\n", locator.file_key));
    if let Some(node_id) = &locator.node_id {
        report.push_str(&format!("- **Node id**: {node_id}\n"));
    }
    if let Some(output_path) = &params.output_path {
        report.push_str(&format!("- **Output path**: {output_path}\n"));
    }
    if params.include_images {
        if let Some(image_path) = &params.image_output_path {
            report.push_str(&format!("- **Image path**: {image_path}\n"));
        }
    }

    report.push_str("\n## Usage notes\n");
    report.push_str(&format!(
        "- Save the generated source as `{component_name}.tsx`\n"
    ));
    report.push_str("- Requires `react` (and `@types/react` for TypeScript projects)\n");
    if params.include_images {
        report.push_str(
            "- Downloaded image assets are referenced relative to the component file\n",
        );
    }

    report.push_str("\n## Generated component\n\n");
    report.push_str(source);

    ToolReply {
        is_error: false,
        content: vec![report],
    }
}

/// Appends the triggering message to the narration if the last step does
/// not already carry it.
fn with_final(steps: Vec<String>, message: String) -> Vec<String> {
    let mut content = steps;
    if content.last() != Some(&message) {
        content.push(message);
    }
    content
}
