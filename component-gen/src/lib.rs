//! React component generation from serialized design IR.
//!
//! This crate is a deliberately thin boundary: a pure function from IR
//! text plus an asset manifest to TSX source. The orchestrator depends
//! only on this signature; templating detail stays private here.

use thiserror::Error;
use tracing::debug;

/// Generation failures are fatal at the orchestration level.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// No design data was supplied to generate from.
    #[error("design data is empty; nothing to generate")]
    EmptyDesignData,
}

/// Inputs for one component generation.
#[derive(Debug, Clone)]
pub struct ComponentSpec<'a> {
    /// Desired component name; sanitized to a valid identifier.
    pub name: &'a str,
    /// Serialized simplified design (YAML or JSON).
    pub design_data: &'a str,
    /// Asset manifest text, or a placeholder when downloads degraded.
    pub image_manifest: &'a str,
}

/// Generates TSX source approximating the design as a typed React
/// component.
pub fn generate_component(spec: &ComponentSpec<'_>) -> Result<String, CodegenError> {
    if spec.design_data.trim().is_empty() {
        return Err(CodegenError::EmptyDesignData);
    }

    let name = sanitize_component_name(spec.name);
    debug!(component = %name, "generating component source");

    let manifest_block = if spec.image_manifest.trim().is_empty() {
        "// no image assets".to_string()
    } else {
        spec.image_manifest
            .trim()
            .lines()
            .map(|line| format!("// {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let design_summary = indent_block(spec.design_data.trim(), "  ");

    Ok(format!(
        r#"import React from 'react';

/**
 * {name}
 *
 * Generated from a Figma design. Asset files referenced below are
 * expected next to this component unless the import paths are adjusted.
 *
{manifest_lines}
 */

export interface {name}Props {{
  className?: string;
}}

export const {name}: React.FC<{name}Props> = ({{ className }}) => {{
  return (
    <div className={{className}} data-component="{name}">
      {{/* TODO: replace with real layout; design summary below */}}
      {{/*
{design_summary}
      */}}
    </div>
  );
}};

export default {name};
"#,
        name = name,
        manifest_lines = indent_block(&manifest_block, " * "),
        design_summary = design_summary,
    ))
}

/// Collapses arbitrary input into a PascalCase identifier, falling back
/// to `FigmaComponent` when nothing usable remains.
pub fn sanitize_component_name(raw: &str) -> String {
    let mut out = String::new();
    let mut upper_next = true;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if out.is_empty() || out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return "FigmaComponent".to_string();
    }
    out
}

fn indent_block(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_design_data_is_an_error() {
        let spec = ComponentSpec {
            name: "Card",
            design_data: "   ",
            image_manifest: "",
        };
        assert!(matches!(
            generate_component(&spec),
            Err(CodegenError::EmptyDesignData)
        ));
    }

    #[test]
    fn generated_source_declares_the_component() {
        let spec = ComponentSpec {
            name: "product card",
            design_data: "metadata:\n  name: Cards",
            image_manifest: "hero-1-2.png <- node 1:2",
        };
        let source = generate_component(&spec).unwrap();
        assert!(source.contains("export const ProductCard"));
        assert!(source.contains("export interface ProductCardProps"));
        assert!(source.contains("hero-1-2.png"));
    }

    #[test]
    fn sanitize_produces_pascal_case() {
        assert_eq!(sanitize_component_name("My-File"), "MyFile");
        assert_eq!(sanitize_component_name("sign up flow"), "SignUpFlow");
        assert_eq!(sanitize_component_name("Card"), "Card");
    }

    #[test]
    fn sanitize_falls_back_on_unusable_input() {
        assert_eq!(sanitize_component_name("!!!"), "FigmaComponent");
        assert_eq!(sanitize_component_name(""), "FigmaComponent");
        assert_eq!(sanitize_component_name("42nd"), "FigmaComponent");
    }
}
