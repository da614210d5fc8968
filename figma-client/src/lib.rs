//! Figma REST client, locator resolution and asset download.
//!
//! This crate owns everything that talks to (or parses references into)
//! the Figma API:
//!   * [`locator`] — user-supplied URL/key strings → canonical locators
//!   * [`client`] — document/node fetch and two-step image export
//!   * [`types`] — the raw wire node tree the extraction layer consumes
//!
//! Everything downstream of the fetch treats the raw tree as read-only.

pub mod client;
pub mod errors;
pub mod locator;
pub mod types;

pub use client::FigmaClient;
pub use errors::{FigmaClientError, FigmaClientResult, FigmaProviderError};
pub use locator::{DesignLocator, parse_design_url, smart_parse};
pub use types::{
    AssetManifest, AssetRecord, ImageFormat, ImageNodeRef, RawDocument, RawNode,
};
