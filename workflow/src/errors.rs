//! Unified error type for the workflow crate.
//!
//! Mirrors the pipeline's failure taxonomy: locator, fetch, extraction
//! and code-generation failures are fatal; image discovery/download
//! failures never reach this type — they are absorbed as degraded stage
//! outcomes inside the driver.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Fatal pipeline failures.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The resolver could not find a document identifier in the input.
    /// The message is user-facing; it names the rejected input.
    #[error("invalid Figma reference \"{0}\"; provide a Figma file/design link or a bare file key")]
    InvalidLocator(String),

    /// Remote fetch failed (network, auth, not-found).
    #[error(transparent)]
    Fetch(#[from] figma_client::FigmaClientError),

    /// The raw tree could not be simplified or rendered.
    #[error(transparent)]
    Extraction(#[from] design_ir::IrError),

    /// Component source generation failed.
    #[error(transparent)]
    CodeGen(#[from] component_gen::CodegenError),
}
