//! Presentation zoom and screen ↔ canvas coordinate mapping.
//!
//! Zoom scales around the canvas origin. It never affects exports, which
//! are always produced at 1:1 canvas pixels.

use kurbo::{Affine, Point};

pub const ZOOM_STEP: f64 = 1.1;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Parse the `+` / `-` symbols sent by the zoom buttons.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim() {
            "+" | "in" => Some(Self::In),
            "-" | "out" => Some(Self::Out),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    /// Non-finite or non-positive values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() || zoom <= 0.0 {
            log::warn!("ignoring invalid zoom factor {zoom}");
            return false;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        true
    }

    /// Step the zoom by `ZOOM_STEP`. Returns the new factor.
    pub fn step(&mut self, direction: ZoomDirection) -> f64 {
        let next = match direction {
            ZoomDirection::In => self.zoom * ZOOM_STEP,
            ZoomDirection::Out => self.zoom / ZOOM_STEP,
        };
        self.set_zoom(next);
        self.zoom
    }

    /// Canvas → screen transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom)
    }

    pub fn screen_to_canvas(&self, x: f64, y: f64) -> Point {
        self.transform().inverse() * Point::new(x, y)
    }

    /// Displayed size of a canvas of the given size, in CSS pixels.
    pub fn screen_size(&self, width: u32, height: u32) -> (f64, f64) {
        (f64::from(width) * self.zoom, f64::from(height) * self.zoom)
    }
}
