use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, instrument};
use workflow::{DesignDataParams, fetch_design_text};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::design_data::{
        design_data_request::DesignDataRequest, design_data_response::DesignDataResponse,
    },
};

/// HTTP endpoint returning the simplified design for one file or node.
///
/// Fetches the raw node tree from Figma, runs extraction and returns the
/// deduplicated design rendered in the server's configured format.
/// Failures propagate as [`crate::error_handler::AppError`], which maps
/// Figma statuses (401/403/404/429/5xx) onto the response.
#[instrument(
    name = "design_data_route",
    skip(state, headers, body),
    fields(file_key = %body.file_key)
)]
pub async fn design_data_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<DesignDataRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let params = DesignDataParams {
        file_key: body.file_key,
        node_id: body.node_id,
        depth: body.depth,
    };

    let design = fetch_design_text(&state.figma, &params, state.config.output_format).await?;

    Ok(ApiResponse::success(DesignDataResponse { design })
        .into_response_with_status(StatusCode::OK))
}
