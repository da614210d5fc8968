use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use figma_client::{FigmaClientError, FigmaProviderError};
use thiserror::Error;
use workflow::errors::WorkflowError;

use crate::core::app_state::ConfigError;
use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

/// Handlers return `AppResult<Response>` and use `?`; the error arm lands
/// here and renders the same [`ApiResponse`] envelope the success arm uses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let resp: ApiResponse<()> =
            ApiResponse::error(self.error_code(), self.to_string(), Vec::new());
        resp.into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert `FigmaClientError` to `AppError::Http` with precise HTTP
/// status & code, so upstream failures surface with the right semantics.
impl From<FigmaClientError> for AppError {
    fn from(err: FigmaClientError) -> Self {
        match err {
            FigmaClientError::Provider(p) => match p {
                FigmaProviderError::Unauthorized => AppError::Http {
                    status: StatusCode::UNAUTHORIZED,
                    code: "FIGMA_UNAUTHORIZED",
                    message: "Figma rejected the access token.".into(),
                },
                FigmaProviderError::Forbidden => AppError::Http {
                    status: StatusCode::FORBIDDEN,
                    code: "FIGMA_FORBIDDEN",
                    message: "The token does not have access to this file.".into(),
                },
                FigmaProviderError::NotFound => AppError::Http {
                    status: StatusCode::NOT_FOUND,
                    code: "FILE_NOT_FOUND",
                    message: "Figma file or node not found.".into(),
                },
                FigmaProviderError::RateLimited { retry_after_secs } => AppError::Http {
                    status: StatusCode::TOO_MANY_REQUESTS,
                    code: "RATE_LIMITED",
                    message: match retry_after_secs {
                        Some(secs) => format!("Figma rate limit hit; retry after {secs}s."),
                        None => "Figma rate limit hit.".into(),
                    },
                },
                FigmaProviderError::Timeout | FigmaProviderError::Network(_) => AppError::Http {
                    status: StatusCode::BAD_GATEWAY,
                    code: "FIGMA_UNREACHABLE",
                    message: format!("Could not reach the Figma API: {p}"),
                },
                FigmaProviderError::Server(status) => AppError::Http {
                    status: StatusCode::BAD_GATEWAY,
                    code: "FIGMA_SERVER_ERROR",
                    message: format!("Figma API returned server error {status}."),
                },
                other => AppError::Http {
                    status: StatusCode::BAD_GATEWAY,
                    code: "FIGMA_API_ERROR",
                    message: format!("Figma API request failed: {other}"),
                },
            },
            FigmaClientError::Asset(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "ASSET_ERROR",
                message: format!("Asset export failed: {e}"),
            },
            FigmaClientError::Config(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CLIENT_CONFIG_ERROR",
                message: format!("Figma client misconfigured: {e}"),
            },
            FigmaClientError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

/// Convert `WorkflowError` to `AppError`: caller mistakes are 4xx, Figma
/// failures keep their per-variant mapping, extraction failures mean the
/// fetched document could not be processed.
impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidLocator(_) => AppError::BadRequest(err.to_string()),
            WorkflowError::Fetch(e) => AppError::from(e),
            WorkflowError::Extraction(e) => AppError::Http {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code: "EXTRACTION_FAILED",
                message: format!("Design extraction failed: {e}"),
            },
            WorkflowError::CodeGen(e) => AppError::BadRequest(format!(
                "Component generation failed: {e}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_unauthorized_maps_to_401() {
        let err: AppError = FigmaClientError::from(FigmaProviderError::Unauthorized).into();
        match err {
            AppError::Http { status, code, .. } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(code, "FIGMA_UNAUTHORIZED");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let err: AppError = FigmaClientError::Validation("empty node list".into()).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn workflow_fetch_errors_keep_the_provider_mapping() {
        let source = WorkflowError::Fetch(FigmaProviderError::NotFound.into());
        let err: AppError = source.into();
        match err {
            AppError::Http { status, code, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(code, "FILE_NOT_FOUND");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn workflow_codegen_errors_become_bad_request() {
        let source = WorkflowError::CodeGen(component_gen::CodegenError::EmptyDesignData);
        let err: AppError = source.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn error_response_carries_the_envelope() {
        let response = AppError::BadRequest("missing fileKey".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap();
        assert!(content_type.to_str().unwrap().starts_with("application/json"));
    }
}
