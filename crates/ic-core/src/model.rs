//! Core data model: colors, image layers, and the ordered layer stack.
//!
//! The stack is a flat, bottom → top sequence of image layers with a single
//! optional selection. Reordering always acts on one layer relative to its
//! neighbours; there is no grouping or nesting.

use crate::id::LayerId;
use image::{Rgba, RgbaImage};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [15u8; 4];
                for (slot, &c) in ch.iter_mut().zip(bytes) {
                    *slot = hex_val(c)?;
                }
                Some(Self::from_rgba8(ch[0] * 17, ch[1] * 17, ch[2] * 17, ch[3] * 17))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (slot, pair) in ch.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Parse a hex string or one of the CSS color names the canvas
    /// configuration commonly uses.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "gray" | "grey" => (128, 128, 128),
            "skyblue" => (135, 206, 235),
            _ => return Self::from_hex(s),
        };
        Some(Self::from_rgba8(named.0, named.1, named.2, 255))
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let Rgba([r, g, b, a]) = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

/// A single decoded image placed on the canvas.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub pixels: RgbaImage,
    /// Offset of the layer's top-left corner in canvas pixels.
    pub left: i64,
    pub top: i64,
}

impl Layer {
    /// New layer at the canvas origin.
    pub fn new(id: LayerId, pixels: RgbaImage) -> Self {
        Self {
            id,
            pixels,
            left: 0,
            top: 0,
        }
    }

    /// Axis-aligned bounds in canvas space.
    pub fn bounds(&self) -> Rect {
        let (w, h) = self.pixels.dimensions();
        Rect::new(
            self.left as f64,
            self.top as f64,
            (self.left + i64::from(w)) as f64,
            (self.top + i64::from(h)) as f64,
        )
    }

    /// Whether a canvas-space point falls inside the layer's bounding box.
    /// Left/top edges are inclusive, right/bottom exclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let b = self.bounds();
        x >= b.x0 && x < b.x1 && y >= b.y0 && y < b.y1
    }
}

/// Serializable summary of a layer for UI listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    pub id: LayerId,
    pub width: u32,
    pub height: u32,
    pub left: i64,
    pub top: i64,
    /// Position in the stack, 0 = bottom.
    pub z_index: usize,
    pub selected: bool,
}

// ─── Layer Stack ─────────────────────────────────────────────────────────

/// Ordered image layers, bottom → top, with at most one selected layer.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    selected: Option<LayerId>,
}

impl LayerStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer on top of the stack.
    pub fn push(&mut self, layer: Layer) -> LayerId {
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Remove a layer by id. Clears the selection if it pointed at it.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let pos = self.position(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.layers.remove(pos))
    }

    /// Stack position of a layer, 0 = bottom.
    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Layers in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    /// Select a layer. Returns false (selection unchanged) if the id is
    /// not in the stack.
    pub fn select(&mut self, id: LayerId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    /// Move a layer one step backward in z-order (swap with the layer below).
    /// Returns true if the z-order changed.
    pub fn send_backward(&mut self, id: LayerId) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => self.move_layer(pos, pos - 1),
            _ => false,
        }
    }

    /// Move a layer one step forward in z-order (swap with the layer above).
    /// Returns true if the z-order changed.
    pub fn bring_forward(&mut self, id: LayerId) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.layers.len() => self.move_layer(pos, pos + 1),
            _ => false,
        }
    }

    /// Move a layer to the bottom of the stack.
    pub fn send_to_back(&mut self, id: LayerId) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => self.move_layer(pos, 0),
            _ => false,
        }
    }

    /// Move a layer to the top of the stack.
    pub fn bring_to_front(&mut self, id: LayerId) -> bool {
        let last = self.layers.len().saturating_sub(1);
        match self.position(id) {
            Some(pos) if pos < last => self.move_layer(pos, last),
            _ => false,
        }
    }

    fn move_layer(&mut self, from: usize, to: usize) -> bool {
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        true
    }

    /// Summaries of every layer, bottom first.
    pub fn infos(&self) -> Vec<LayerInfo> {
        self.layers
            .iter()
            .enumerate()
            .map(|(z_index, layer)| LayerInfo {
                id: layer.id,
                width: layer.pixels.width(),
                height: layer.pixels.height(),
                left: layer.left,
                top: layer.top,
                z_index,
                selected: self.selected == Some(layer.id),
            })
            .collect()
    }
}
