use design_ir::OutputFormat;
use figma_client::FigmaClient;
use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    /// OUTPUT_FORMAT was set but is neither "yaml" nor "json".
    #[error("invalid OUTPUT_FORMAT value: {0}")]
    InvalidOutputFormat(String),

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Server configuration, resolved once from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API base for Figma, e.g. "https://api.figma.com/v1".
    pub figma_api_base: String,
    /// Personal access token sent as "X-Figma-Token".
    pub figma_token: String,
    /// Port the HTTP server binds on.
    pub port: u16,
    /// Format the simplified design is rendered in.
    pub output_format: OutputFormat,
    /// When set, the image export route is not registered and the
    /// workflow skips its image stage.
    pub skip_image_downloads: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let figma_token =
            std::env::var("FIGMA_TOKEN").map_err(|_| ConfigError::MissingEnv("FIGMA_TOKEN"))?;

        let figma_api_base = std::env::var("FIGMA_API_BASE")
            .unwrap_or_else(|_| "https://api.figma.com/v1".into());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 3333,
        };

        let output_format = match std::env::var("OUTPUT_FORMAT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidOutputFormat(raw))?,
            Err(_) => OutputFormat::Yaml,
        };

        let skip_image_downloads = std::env::var("SKIP_IMAGE_DOWNLOADS")
            .map(|raw| raw == "true" || raw == "1")
            .unwrap_or(false);

        Ok(Self {
            figma_api_base,
            figma_token,
            port,
            output_format,
            skip_image_downloads,
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Figma client shared across requests; owns the pooled HTTP client.
    pub figma: FigmaClient,
}

impl AppState {
    /// Build shared state from resolved configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent("figma-bridge/0.1")
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let figma = FigmaClient::new(
            http,
            config.figma_api_base.clone(),
            config.figma_token.clone(),
        );

        Ok(Self { config, figma })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_carries_the_configured_format() {
        let config = ServerConfig {
            figma_api_base: "https://api.figma.com/v1".into(),
            figma_token: "tok".into(),
            port: 3333,
            output_format: OutputFormat::Json,
            skip_image_downloads: true,
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.config.output_format, OutputFormat::Json);
        assert!(state.config.skip_image_downloads);
    }
}
