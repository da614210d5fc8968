pub mod generate_component_request;
pub mod generate_component_response;
pub mod generate_component_route;
