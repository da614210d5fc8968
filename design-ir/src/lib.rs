//! Extraction engine: raw Figma trees → compact, deduplicated IR.
//!
//! Pipeline position: the fetch client hands this crate a raw node tree;
//! [`simplify::simplify_document`] walks it depth-first with an explicit
//! depth bound, offers every node to the extractor set and interns
//! shareable style values into a content-addressed global table. The
//! result renders as YAML or JSON ([`render`]) and feeds the image-node
//! selector ([`images`]) and the code generator downstream.
//!
//! All entry points are pure functions over their inputs; nothing here
//! holds state across requests, so concurrent runs need no locking.

pub mod errors;
pub mod extract;
pub mod images;
pub mod model;
pub mod render;
pub mod simplify;

pub use errors::{IrError, IrResult};
pub use extract::{Extractor, all_extractors};
pub use images::{select_image_nodes, select_image_nodes_from_text};
pub use model::{
    DesignMetadata, GlobalStyle, GlobalStyleTable, SimplifiedDesign, SimplifiedNode,
};
pub use render::{OutputFormat, render};
pub use simplify::{SimplifyOptions, simplify_document};
