use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, instrument};
use workflow::{GenerateComponentParams, generate_component_source};

use crate::{
    core::http::response_envelope::ApiResponse,
    error_handler::AppResult,
    routes::generate_component::{
        generate_component_request::GenerateComponentRequest,
        generate_component_response::GenerateComponentResponse,
    },
};

/// HTTP endpoint generating a React component from serialized design data.
///
/// Purely local; never calls the Figma API. Empty design data surfaces as
/// a 400 via [`crate::error_handler::AppError`].
#[instrument(name = "generate_component_route", skip(headers, body))]
pub async fn generate_component_route(
    headers: HeaderMap,
    Json(body): Json<GenerateComponentRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let params = GenerateComponentParams {
        design_data: body.design_data,
        image_manifest: body.image_manifest,
        component_name: body.component_name,
    };

    let source = generate_component_source(&params)?;

    Ok(ApiResponse::success(GenerateComponentResponse { source })
        .into_response_with_status(StatusCode::OK))
}
