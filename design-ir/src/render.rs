//! IR rendering: one logical structure, two textual formats.

use std::str::FromStr;

use crate::errors::{IrError, IrResult};
use crate::model::SimplifiedDesign;

/// Output format for rendered IR, selected by caller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(IrError::UnknownFormat(other.to_string())),
        }
    }
}

/// Renders the design as YAML or pretty JSON.
///
/// Both formats round-trip the same logical structure
/// (`metadata` / `nodes` / `globalVars`).
pub fn render(design: &SimplifiedDesign, format: OutputFormat) -> IrResult<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yml::to_string(design)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(design)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DesignMetadata, GlobalStyleTable, SimplifiedDesign, SimplifiedNode};
    use serde_json::json;

    fn sample_design() -> SimplifiedDesign {
        let mut globals = GlobalStyleTable::default();
        let fill_id = globals.intern("fills", json!(["#FF0000"]));

        let mut node = SimplifiedNode {
            id: "1:2".into(),
            name: "Card".into(),
            node_type: "FRAME".into(),
            properties: Default::default(),
            children: Vec::new(),
        };
        node.properties
            .insert("fills".into(), json!(fill_id));

        SimplifiedDesign {
            metadata: DesignMetadata {
                name: "Sample".into(),
                last_modified: None,
                version: Some("1".into()),
            },
            nodes: vec![node],
            global_vars: globals,
        }
    }

    #[test]
    fn formats_round_trip_the_same_structure() {
        let design = sample_design();

        let yaml = render(&design, OutputFormat::Yaml).unwrap();
        let json = render(&design, OutputFormat::Json).unwrap();

        let from_yaml: SimplifiedDesign = serde_yml::from_str(&yaml).unwrap();
        let from_json: SimplifiedDesign = serde_json::from_str(&json).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml, design);
    }

    #[test]
    fn format_parses_from_config_strings() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
