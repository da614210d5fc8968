pub mod export_images_request;
pub mod export_images_response;
pub mod export_images_route;
