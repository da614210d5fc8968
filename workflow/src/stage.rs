//! Stage outcome tags and the dispatch-boundary reply type.
//!
//! Control flow through the pipeline is data, not exceptions: every stage
//! returns a tagged outcome and the driver decides continue-vs-abort from
//! the tag while narration accumulates in order.

use serde::{Deserialize, Serialize};

/// Result of one pipeline stage.
#[derive(Debug, Clone)]
pub enum StageOutcome<T> {
    /// Stage completed; the pipeline continues with the value and the
    /// optional note joins the narration.
    Success { value: T, note: Option<String> },
    /// Stage failed non-fatally; the pipeline continues with a fallback
    /// and records the warning as narration.
    Degraded { fallback: T, warning: String },
    /// Stage failed fatally; the run aborts with this message.
    Fatal(String),
}

/// Applies a stage outcome to the running narration.
///
/// `Ok` carries the value to continue with (the fallback for degraded
/// stages); `Err` carries the fatal message for the driver to surface.
/// Success notes and degradation warnings both land in `steps`, so the
/// final report documents what happened regardless of the tag.
pub fn apply_outcome<T>(steps: &mut Vec<String>, outcome: StageOutcome<T>) -> Result<T, String> {
    match outcome {
        StageOutcome::Success { value, note } => {
            if let Some(note) = note {
                steps.push(note);
            }
            Ok(value)
        }
        StageOutcome::Degraded { fallback, warning } => {
            steps.push(warning);
            Ok(fallback)
        }
        StageOutcome::Fatal(message) => Err(message),
    }
}

/// The sole contract the dispatch boundary relies on: ordered text
/// content plus an error flag. Finalized once, never mutated after
/// return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReply {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    pub content: Vec<String>,
}

impl ToolReply {
    /// Success reply with one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            content: vec![text.into()],
        }
    }

    /// Error reply carrying the narration accumulated so far plus the
    /// triggering message.
    pub fn error(content: Vec<String>) -> Self {
        Self {
            is_error: true,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_passes_value_through() {
        let mut steps = Vec::new();
        let value = apply_outcome(
            &mut steps,
            StageOutcome::Success {
                value: 7,
                note: None,
            },
        )
        .unwrap();
        assert_eq!(value, 7);
        assert!(steps.is_empty());
    }

    #[test]
    fn success_note_joins_the_narration() {
        let mut steps = vec!["earlier step".to_string()];
        let value = apply_outcome(
            &mut steps,
            StageOutcome::Success {
                value: "manifest",
                note: Some("assets downloaded".to_string()),
            },
        )
        .unwrap();
        assert_eq!(value, "manifest");
        assert_eq!(steps.last().unwrap(), "assets downloaded");
    }

    #[test]
    fn degraded_records_warning_and_continues() {
        let mut steps = vec!["earlier step".to_string()];
        let value = apply_outcome(
            &mut steps,
            StageOutcome::Degraded {
                fallback: "placeholder".to_string(),
                warning: "download failed".to_string(),
            },
        )
        .unwrap();
        assert_eq!(value, "placeholder");
        assert_eq!(steps.last().unwrap(), "download failed");
    }

    #[test]
    fn fatal_surfaces_the_message() {
        let mut steps = Vec::new();
        let err = apply_outcome::<()>(&mut steps, StageOutcome::Fatal("boom".into())).unwrap_err();
        assert_eq!(err, "boom");
    }
}
