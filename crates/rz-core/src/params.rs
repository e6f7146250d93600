//! Per-story configuration supplied by the host under the `resizr` key.

use crate::constants::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, FALLBACK_HEIGHT, FALLBACK_WIDTH};
use crate::error::Result;
use crate::model::{PresetMap, Size};
use serde::Deserialize;

/// Host parameters. Every field is optional; absent fields take defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizrParameters {
    /// Turn the frame and toolbar off for this story.
    pub disable: bool,
    pub default_width: Option<u32>,
    pub default_height: Option<u32>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Show a live `{w}x{h}` label on the overlay.
    pub show_dimensions: bool,
    pub presets: Option<PresetMap>,
}

impl ResizrParameters {
    /// Parse a parameters document. An empty string or `null` means defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    pub fn constraints(&self) -> ResizeConstraints {
        ResizeConstraints {
            min_width: self.min_width.unwrap_or(DEFAULT_MIN_WIDTH),
            min_height: self.min_height.unwrap_or(DEFAULT_MIN_HEIGHT),
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Configured presets, or the built-in minimal set.
    pub fn presets(&self) -> PresetMap {
        self.presets.clone().unwrap_or_else(PresetMap::minimal)
    }

    /// Start size for a drag when the surface can't be measured.
    pub fn fallback_size(&self) -> Size {
        match (self.default_width, self.default_height) {
            (Some(width), Some(height)) => Size { width, height },
            _ => Size::new(FALLBACK_WIDTH, FALLBACK_HEIGHT),
        }
    }
}

/// Bounds applied to every drag result. `max < min` is not rejected; the
/// minimum wins when they conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConstraints {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for ResizeConstraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::PresetId;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_gives_defaults() {
        let p = ResizrParameters::from_json("").unwrap();
        assert!(!p.disable);
        assert_eq!(p.constraints(), ResizeConstraints::default());
        assert_eq!(p.presets(), PresetMap::minimal());
        assert_eq!(p.fallback_size(), Size::new(800, 600));
    }

    #[test]
    fn camel_case_fields() {
        let p = ResizrParameters::from_json(
            r#"{ "minWidth": 320, "maxWidth": 1200, "maxHeight": 900, "showDimensions": true }"#,
        )
        .unwrap();
        assert_eq!(
            p.constraints(),
            ResizeConstraints {
                min_width: 320,
                min_height: 200,
                max_width: Some(1200),
                max_height: Some(900),
            }
        );
        assert!(p.show_dimensions);
    }

    #[test]
    fn fallback_needs_both_defaults() {
        let p = ResizrParameters::from_json(r#"{ "defaultWidth": 1024 }"#).unwrap();
        assert_eq!(p.fallback_size(), Size::new(800, 600));
        let p = ResizrParameters::from_json(r#"{ "defaultWidth": 1024, "defaultHeight": 768 }"#)
            .unwrap();
        assert_eq!(p.fallback_size(), Size::new(1024, 768));
    }

    #[test]
    fn custom_presets_replace_builtins() {
        let p = ResizrParameters::from_json(
            r#"{ "presets": { "watch": { "name": "Watch", "styles": { "width": "198px", "height": "242px" }, "type": "other" } } }"#,
        )
        .unwrap();
        let presets = p.presets();
        assert_eq!(presets.len(), 1);
        assert_eq!(
            presets.get(PresetId::intern("watch")).unwrap().size,
            Size::new(198, 242)
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ResizrParameters::from_json("{ not json").is_err());
        assert!(ResizrParameters::from_json(r#"{ "minWidth": "wide" }"#).is_err());
    }
}
