//! Editor settings.

use crate::history::MAX_UNDO;
use crate::tools::ToolKind;
use crate::viewport::{CHAR_PIXELS_H, CHAR_PIXELS_V};
use serde::{Deserialize, Serialize};

/// Settings applied when an [`Editor`](crate::Editor) is created.
///
/// Missing fields fall back to their defaults when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Number of committed changes kept for undo.
    pub undo_capacity: usize,
    /// Cell width in pixels at zoom 1.
    pub cell_width: f64,
    /// Cell height in pixels at zoom 1.
    pub cell_height: f64,
    /// Glyph stamped by the freeform tool until changed.
    pub freeform_glyph: char,
    pub initial_tool: ToolKind,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_capacity: MAX_UNDO,
            cell_width: CHAR_PIXELS_H,
            cell_height: CHAR_PIXELS_V,
            freeform_glyph: '*',
            initial_tool: ToolKind::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"undo_capacity": 5, "initial_tool": "Freeform"}"#).unwrap();
        assert_eq!(config.undo_capacity, 5);
        assert_eq!(config.initial_tool, ToolKind::Freeform);
        assert_eq!(config.freeform_glyph, '*');
        assert_eq!(config.cell_width, CHAR_PIXELS_H);
    }

    #[test]
    fn test_roundtrip() {
        let config = EditorConfig { freeform_glyph: '#', ..EditorConfig::default() };
        let loaded = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }
}
