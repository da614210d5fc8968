use serde::Serialize;

/// Response body carrying the rendered simplified design.
#[derive(Debug, Serialize)]
pub struct DesignDataResponse {
    /// Simplified design in the server's configured format (YAML/JSON).
    pub design: String,
}
