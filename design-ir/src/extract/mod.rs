//! Pluggable per-concern extractors without trait objects.
//!
//! This module exposes an enum [`Extractor`] that wraps one concrete
//! extraction concern each (layout, text, visuals, components). The
//! simplifier offers every visited raw node to each extractor in
//! registration order; an extractor either contributes named properties
//! or declines via [`Extractor::applies_to`].

pub mod component;
pub mod layout;
pub mod text;
pub mod visual;

use figma_client::types::RawNode;
use serde_json::Value;

/// One extracted property contribution.
#[derive(Debug, Clone)]
pub struct ExtractedProperty {
    /// Property name in the simplified node's mapping.
    pub name: &'static str,
    pub value: Value,
    /// Shareable values are interned into the global style table and the
    /// node stores only the reference id. Composite style objects (fills,
    /// strokes, typography, layout) are shareable; scalars are not.
    pub shareable: bool,
}

impl ExtractedProperty {
    pub fn inline(name: &'static str, value: Value) -> Self {
        Self {
            name,
            value,
            shareable: false,
        }
    }

    pub fn shared(name: &'static str, value: Value) -> Self {
        Self {
            name,
            value,
            shareable: true,
        }
    }
}

/// Concrete extractor with enum dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Layout,
    Text,
    Visual,
    Component,
}

impl Extractor {
    /// Whether this extractor has anything to say about `node_type`.
    pub fn applies_to(&self, node_type: &str) -> bool {
        match self {
            Self::Layout => true,
            Self::Text => text::applies_to(node_type),
            Self::Visual => true,
            Self::Component => component::applies_to(node_type),
        }
    }

    /// Extracts zero or more named properties from `node`.
    pub fn extract(&self, node: &RawNode) -> Vec<ExtractedProperty> {
        match self {
            Self::Layout => layout::extract(node),
            Self::Text => text::extract(node),
            Self::Visual => visual::extract(node),
            Self::Component => component::extract(node),
        }
    }
}

/// The full extractor set in registration order.
///
/// When two extractors contribute the same property name, the
/// later-registered extractor wins. This is documented behavior the
/// simplifier relies on, not an accident of iteration order.
pub fn all_extractors() -> Vec<Extractor> {
    vec![
        Extractor::Layout,
        Extractor::Text,
        Extractor::Visual,
        Extractor::Component,
    ]
}
