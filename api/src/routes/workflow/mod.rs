pub mod run_workflow_request;
pub mod run_workflow_response;
pub mod run_workflow_route;
