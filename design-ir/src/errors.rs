//! Crate-wide error hierarchy for design-ir.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type IrResult<T> = Result<T, IrError>;

/// Root error type for the design-ir crate.
#[derive(Debug, Error)]
pub enum IrError {
    /// The fetched document carried no usable content.
    #[error("document root has no content")]
    EmptyDocument,

    /// JSON serialization failure while rendering the IR.
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure while rendering the IR.
    #[error("yaml serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// Caller supplied an output format name we do not support.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}
