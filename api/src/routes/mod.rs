pub mod design_data;
pub mod export_images;
pub mod generate_component;
pub mod workflow;
