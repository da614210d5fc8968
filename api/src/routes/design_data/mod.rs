pub mod design_data_request;
pub mod design_data_response;
pub mod design_data_route;
