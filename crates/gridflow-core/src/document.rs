//! Versioned JSON documents for persisting a layer.
//!
//! A document stores the layer's bounding box as text anchored at `(x, y)`.
//! From version 3 a sparse `colors` map keyed by anchor-relative `"dx,dy"`
//! carries `[fg, bg]` for colored cells. Documents without a version come
//! from the legacy editor and go through [`normalize_legacy`] first.

use crate::characters::{ALT_SPECIAL_VALUE, SPECIAL_VALUE, UNICODE, glyph_for_directions, is_special};
use crate::geometry::{Direction, GridBox, Vector};
use crate::layer::{Cell, ColorIndex, GridView, Layer};
use crate::text::{OutOfGrid, layer_to_text, try_text_to_layer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Version written by [`serialize`].
pub const CURRENT_VERSION: u32 = 3;
/// First version carrying per-cell colors.
pub const COLORS_VERSION: u32 = 3;

/// Errors from reading a persisted document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(u32),
    #[error("Document out of range: {0}")]
    OutOfRange(#[from] OutOfGrid),
}

/// Wire form of a persisted layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub x: i32,
    pub y: i32,
    pub text: String,
    /// Raw color entries; each is validated on its own when read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, serde_json::Value>>,
}

/// Serialize a layer into a version 3 document.
pub fn serialize(layer: &Layer) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(&to_document(layer))?)
}

/// Build the wire form of a layer.
pub fn to_document(layer: &Layer) -> LayerDocument {
    let cells = layer.cells();
    let Some(bounds) = GridBox::bounding(cells.iter().map(|(p, _)| *p)) else {
        return LayerDocument {
            version: Some(CURRENT_VERSION),
            x: 0,
            y: 0,
            text: String::new(),
            colors: None,
        };
    };

    let anchor = bounds.top_left();
    let colors: BTreeMap<String, serde_json::Value> = cells
        .iter()
        .filter(|(_, cell)| cell.has_color())
        .map(|(position, cell)| {
            let key = (*position - anchor).to_string();
            let entry = serde_json::json!([cell.fg, cell.bg]);
            (key, entry)
        })
        .collect();

    LayerDocument {
        version: Some(CURRENT_VERSION),
        x: anchor.x,
        y: anchor.y,
        text: layer_to_text(layer, Some(bounds)),
        colors: (!colors.is_empty()).then_some(colors),
    }
}

/// Parse a document into a layer.
///
/// A malformed top-level document fails as a whole. Individual color
/// entries that are malformed, out of range, or point at an empty cell are
/// skipped.
pub fn deserialize(json: &str) -> Result<Layer, DocumentError> {
    let document: LayerDocument = serde_json::from_str(json)?;
    from_document(&document)
}

/// Convert a parsed document into a layer.
pub fn from_document(document: &LayerDocument) -> Result<Layer, DocumentError> {
    let anchor = Vector::new(document.x, document.y);
    let Some(version) = document.version.filter(|v| *v != 0) else {
        log::info!("normalizing legacy document at {anchor}");
        return Ok(normalize_legacy(&try_text_to_layer(&document.text, anchor)?));
    };
    if version > CURRENT_VERSION {
        return Err(DocumentError::UnsupportedVersion(version));
    }

    let mut layer = try_text_to_layer(&document.text, anchor)?;
    if version >= COLORS_VERSION {
        if let Some(colors) = &document.colors {
            apply_colors(&mut layer, anchor, colors);
        }
    }
    Ok(layer)
}

fn apply_colors(layer: &mut Layer, anchor: Vector, colors: &BTreeMap<String, serde_json::Value>) {
    for (key, entry) in colors {
        let Ok(offset) = key.parse::<Vector>() else {
            log::warn!("skipping color entry with invalid key {key:?}");
            continue;
        };
        let Some(pair) = entry.as_array() else {
            log::warn!("skipping color entry {key:?}: not an array");
            continue;
        };
        let Some(position) = anchor.checked_add(offset) else {
            log::warn!("skipping color entry {key:?}: offset from {anchor} leaves the grid");
            continue;
        };
        let Some(existing) = layer.get(position).copied() else {
            log::warn!("skipping color entry {key:?}: no glyph at {position}");
            continue;
        };
        let color_at = |i: usize| pair.get(i).and_then(serde_json::Value::as_i64).and_then(ColorIndex::new);
        layer.set(position, Cell::with_colors(existing.glyph, color_at(0), color_at(1)));
    }
}

/// Resolve the placeholder glyphs legacy documents store for lines and arrows.
///
/// A line placeholder becomes the glyph joining every direction that holds a
/// special neighbor. An arrow placeholder points away from its neighbor.
pub fn normalize_legacy(layer: &Layer) -> Layer {
    let neighbors = |position: Vector| -> HashMap<Direction, bool> {
        Direction::ALL
            .iter()
            .map(|d| {
                let neighbor = position.checked_add(d.delta()).and_then(|p| layer.glyph(p));
                (*d, neighbor.is_some_and(is_special))
            })
            .collect()
    };

    layer
        .iter()
        .map(|(position, cell)| {
            let glyph = match cell.glyph {
                SPECIAL_VALUE => {
                    let n = neighbors(position);
                    let (up, down, left, right) =
                        (n[&Direction::Up], n[&Direction::Down], n[&Direction::Left], n[&Direction::Right]);
                    glyph_for_directions(up, down, left, right).unwrap_or(match (up || down, left || right) {
                        (true, false) => UNICODE.line_vertical,
                        (false, true) => UNICODE.line_horizontal,
                        _ => SPECIAL_VALUE,
                    })
                }
                ALT_SPECIAL_VALUE => {
                    let n = neighbors(position);
                    if n[&Direction::Left] {
                        UNICODE.arrow_right
                    } else if n[&Direction::Right] {
                        UNICODE.arrow_left
                    } else if n[&Direction::Up] {
                        UNICODE.arrow_down
                    } else if n[&Direction::Down] {
                        UNICODE.arrow_up
                    } else {
                        ALT_SPECIAL_VALUE
                    }
                }
                other => other,
            };
            (position, cell.with_glyph(glyph))
        })
        .collect()
}
