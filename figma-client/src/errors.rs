//! Crate-wide error hierarchy for figma-client.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type FigmaClientResult<T> = Result<T, FigmaClientError>;

/// Root error type for the figma-client crate.
#[derive(Debug, Error)]
pub enum FigmaClientError {
    /// Figma REST API related failure.
    #[error(transparent)]
    Provider(#[from] FigmaProviderError),

    /// Asset download / local write failure.
    #[error(transparent)]
    Asset(#[from] FigmaAssetError),

    /// Configuration problems (bad/missing token, base URL, etc.).
    #[error(transparent)]
    Config(#[from] FigmaConfigError),

    /// Input validation errors (bad file keys, empty node lists, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Provider-specific error used inside the REST client layer.
#[derive(Debug, Error)]
pub enum FigmaProviderError {
    /// Unauthorized (HTTP 401) — missing or rejected access token.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// File or node not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited {
        /// Optional `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of a Figma response.
    #[error("invalid figma response: {0}")]
    InvalidResponse(String),

    /// Figma reported an application-level error in the response body.
    #[error("figma api error: {0}")]
    Api(String),
}

/// Asset export / download related errors.
#[derive(Debug, Error)]
pub enum FigmaAssetError {
    /// I/O error while writing downloaded assets to disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Figma returned no render URL for a requested node.
    #[error("no export url returned for node {0}")]
    MissingUrl(String),
}

/// Configuration and setup errors (base API URL, missing token, etc.).
#[derive(Debug, Error)]
pub enum FigmaConfigError {
    /// Missing required access token.
    #[error("missing figma access token")]
    MissingToken,

    /// Invalid base API URL.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for FigmaClientError {
    fn from(e: reqwest::Error) -> Self {
        FigmaClientError::Provider(FigmaProviderError::from(e))
    }
}

impl From<std::io::Error> for FigmaClientError {
    fn from(e: std::io::Error) -> Self {
        FigmaClientError::Asset(FigmaAssetError::Io(e))
    }
}

// ===== Mapping from reqwest::Error into FigmaProviderError =====

impl From<reqwest::Error> for FigmaProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return FigmaProviderError::Timeout;
        }

        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => FigmaProviderError::Unauthorized,
                403 => FigmaProviderError::Forbidden,
                404 => FigmaProviderError::NotFound,
                429 => FigmaProviderError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => FigmaProviderError::Server(code),
                _ => FigmaProviderError::HttpStatus(code),
            };
        }

        if e.is_decode() {
            return FigmaProviderError::InvalidResponse(e.to_string());
        }

        FigmaProviderError::Network(e.to_string())
    }
}
