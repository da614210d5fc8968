use serde::Serialize;

/// Response body carrying the generated component source.
#[derive(Debug, Serialize)]
pub struct GenerateComponentResponse {
    /// TypeScript React component source.
    pub source: String,
}
