//! Reference resolver: user-supplied locator strings → canonical
//! (file key, node id) pairs.
//!
//! Figma shares links in several surface forms:
//!   * `https://www.figma.com/file/<key>/<name>?node-id=1-2`
//!   * `https://www.figma.com/design/<key>/<name>?node-id=1-2`
//!   * a bare file key pasted out of another tool
//!
//! The URL form encodes node separators as dashes (`1-2`) where the REST
//! API expects colons (`1:2`); resolution converts them back. Invalid
//! input is reported through [`DesignLocator::is_valid`], never as an
//! error.

use url::Url;

/// Resolved design reference. Produced once per request, immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignLocator {
    /// Mandatory file key; empty when `is_valid` is false.
    pub file_key: String,
    /// Optional node id in canonical `1:2` form.
    pub node_id: Option<String>,
    /// Display name taken from the URL path segment after the key.
    pub file_name: Option<String>,
    /// False when no file/design marker could be found in the input.
    pub is_valid: bool,
}

impl DesignLocator {
    fn invalid() -> Self {
        Self {
            file_key: String::new(),
            node_id: None,
            file_name: None,
            is_valid: false,
        }
    }
}

/// Path segments that mark the following segment as the file key.
const KEY_MARKERS: [&str; 3] = ["file", "design", "proto"];

/// Strict resolver: parses a full Figma URL into a [`DesignLocator`].
///
/// Never panics or returns an error — anything that does not contain a
/// recognizable file/design marker resolves to an invalid locator.
pub fn parse_design_url(input: &str) -> DesignLocator {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DesignLocator::invalid();
    }

    let Ok(url) = Url::parse(trimmed) else {
        return DesignLocator::invalid();
    };
    let Some(segments) = url.path_segments() else {
        return DesignLocator::invalid();
    };
    let segments: Vec<&str> = segments.collect();

    let Some(marker_index) = segments
        .iter()
        .position(|segment| KEY_MARKERS.contains(segment))
    else {
        return DesignLocator::invalid();
    };

    let Some(file_key) = segments
        .get(marker_index + 1)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
    else {
        return DesignLocator::invalid();
    };

    let file_name = segments
        .get(marker_index + 2)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| segment.to_string())
        });

    let node_id = url
        .query_pairs()
        .find_map(|(key, value)| (key == "node-id").then_some(value.to_string()))
        .and_then(|raw| normalize_node_id(&raw));

    DesignLocator {
        file_key,
        node_id,
        file_name,
        is_valid: true,
    }
}

/// Smart resolver: accepts looser input than [`parse_design_url`].
///
/// A bare file key is taken as-is, but only when the whole input looks
/// like one (ASCII alphanumeric, the charset Figma keys use); free text
/// such as `"not a url"` must not resolve. An explicit `node_hint` wins
/// over anything encoded in the input. Everything else falls back to
/// strict URL parsing.
pub fn smart_parse(input: &str, node_hint: Option<&str>) -> DesignLocator {
    let trimmed = input.trim();
    let hint = node_hint.and_then(normalize_node_id);

    if looks_like_file_key(trimmed) {
        return DesignLocator {
            file_key: trimmed.to_string(),
            node_id: hint,
            file_name: None,
            is_valid: true,
        };
    }

    let mut locator = parse_design_url(trimmed);
    if hint.is_some() {
        locator.node_id = hint;
    }
    locator
}

fn looks_like_file_key(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Converts the URL-encoded dash separator back to the canonical colon.
/// Ids that already carry a colon pass through unchanged.
fn normalize_node_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains(':') {
        return Some(trimmed.to_string());
    }
    if trimmed.contains('-') {
        return Some(trimmed.replacen('-', ":", 1));
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{DesignLocator, normalize_node_id, parse_design_url, smart_parse};

    #[test]
    fn parses_file_url_with_node_id() {
        let locator =
            parse_design_url("https://design.example.com/file/ABC123/My-File?node-id=1-2");
        assert!(locator.is_valid);
        assert_eq!(locator.file_key, "ABC123");
        assert_eq!(locator.node_id.as_deref(), Some("1:2"));
        assert_eq!(locator.file_name.as_deref(), Some("My-File"));
    }

    #[test]
    fn parses_design_url_without_node_id() {
        let locator = parse_design_url("https://www.figma.com/design/XYZ987/Landing-Page");
        assert!(locator.is_valid);
        assert_eq!(locator.file_key, "XYZ987");
        assert_eq!(locator.node_id, None);
        assert_eq!(locator.file_name.as_deref(), Some("Landing-Page"));
    }

    #[test]
    fn rejects_non_url_input() {
        let locator = parse_design_url("not a url");
        assert_eq!(locator, DesignLocator::invalid());
    }

    #[test]
    fn rejects_url_without_marker() {
        let locator = parse_design_url("https://www.figma.com/community/ABC123");
        assert!(!locator.is_valid);
        assert!(locator.file_key.is_empty());
    }

    #[test]
    fn rejects_marker_without_key() {
        let locator = parse_design_url("https://www.figma.com/file/");
        assert!(!locator.is_valid);
    }

    #[test]
    fn decodes_percent_encoded_file_name() {
        let locator = parse_design_url("https://www.figma.com/file/K1/Sign%20Up%20Flow");
        assert_eq!(locator.file_name.as_deref(), Some("Sign Up Flow"));
    }

    #[test]
    fn smart_parse_accepts_bare_key() {
        let locator = smart_parse("abc123rawkey", None);
        assert!(locator.is_valid);
        assert_eq!(locator.file_key, "abc123rawkey");
        assert_eq!(locator.node_id, None);
    }

    #[test]
    fn smart_parse_rejects_free_text() {
        // Whitespace and punctuation rule out the bare-key reading, and
        // the input is not a URL either.
        for input in ["not a url", "look at my design!", "key with spaces"] {
            let locator = smart_parse(input, None);
            assert!(!locator.is_valid, "{input:?} must not resolve");
            assert!(locator.file_key.is_empty());
        }
    }

    #[test]
    fn smart_parse_applies_node_hint() {
        let locator = smart_parse("abc123rawkey", Some("12-44"));
        assert_eq!(locator.node_id.as_deref(), Some("12:44"));
    }

    #[test]
    fn smart_parse_falls_back_to_url_parsing() {
        let locator = smart_parse("https://www.figma.com/file/ABC123/Cards?node-id=2-7723", None);
        assert!(locator.is_valid);
        assert_eq!(locator.file_key, "ABC123");
        assert_eq!(locator.node_id.as_deref(), Some("2:7723"));
    }

    #[test]
    fn node_id_normalization_replaces_first_dash_only() {
        assert_eq!(normalize_node_id("12-44").as_deref(), Some("12:44"));
        assert_eq!(normalize_node_id("1:2").as_deref(), Some("1:2"));
        assert_eq!(normalize_node_id("  ").as_deref(), None);
    }
}
