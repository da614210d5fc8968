use serde::Serialize;

/// Response body carrying the consolidated workflow report.
#[derive(Debug, Serialize)]
pub struct RunWorkflowResponse {
    /// Markdown report: step narration, component metadata and the
    /// generated source.
    pub report: String,
}
