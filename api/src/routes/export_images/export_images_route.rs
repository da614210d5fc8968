use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, instrument};
use workflow::{ExportImagesParams, export_design_images};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::export_images::{
        export_images_request::ExportImagesRequest,
        export_images_response::ExportImagesResponse,
    },
};

/// HTTP endpoint for downloading image assets of a Figma file.
///
/// Not registered when the server runs with `SKIP_IMAGE_DOWNLOADS`.
/// Download and filesystem failures propagate as
/// [`crate::error_handler::AppError`].
#[instrument(
    name = "export_images_route",
    skip(state, headers, body),
    fields(file_key = %body.file_key)
)]
pub async fn export_images_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ExportImagesRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let params = ExportImagesParams {
        file_key: body.file_key,
        nodes: body.nodes,
        local_path: body.local_path.unwrap_or_else(|| "./assets".into()),
        png_scale: body.png_scale,
    };

    let manifest = export_design_images(&state.figma, &params).await?;

    Ok(ApiResponse::success(ExportImagesResponse { manifest })
        .into_response_with_status(StatusCode::OK))
}
