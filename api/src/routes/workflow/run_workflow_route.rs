use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, instrument};
use workflow::{WorkflowParams, run_workflow};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::workflow::{
        run_workflow_request::RunWorkflowRequest, run_workflow_response::RunWorkflowResponse,
    },
};

/// HTTP endpoint running the full design-to-component workflow.
///
/// Resolves the URL, fetches and simplifies the design, handles image
/// assets, generates the component and returns the consolidated report.
/// Image-stage failures degrade the run instead of failing the request.
#[instrument(
    name = "run_workflow_route",
    skip(state, headers, body),
    fields(figma_url = %body.figma_url)
)]
pub async fn run_workflow_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RunWorkflowRequest>,
) -> Response {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let include_images =
        body.include_images.unwrap_or(true) && !state.config.skip_image_downloads;

    let params = WorkflowParams {
        figma_url: body.figma_url,
        component_name: body.component_name,
        output_path: body.output_path,
        image_output_path: body.image_output_path,
        include_images,
        depth: body.depth,
    };

    let reply = run_workflow(&state.figma, &params, state.config.output_format).await;

    if reply.is_error {
        // Unresolvable references are the caller's fault; everything else
        // that aborts the workflow is an upstream failure.
        let status = if reply
            .content
            .first()
            .is_some_and(|m| m.starts_with("invalid Figma reference"))
        {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        };

        let resp: ApiResponse<()> =
            ApiResponse::error("WORKFLOW_FAILED", reply.content.join("\n"), Vec::new());
        return resp.into_response_with_status(status);
    }

    ApiResponse::success(RunWorkflowResponse {
        report: reply.content.join("\n\n"),
    })
    .into_response_with_status(StatusCode::OK)
}
