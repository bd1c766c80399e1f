//! Construction parameters for the image canvas and the mask surface.
//!
//! Both structs deserialize from the camelCase JSON the browser passes in,
//! e.g. `{"id":"app","width":900,"height":700,"backgroundColor":"skyblue"}`.

use crate::error::{InpaintError, Result};
use crate::model::Color;
use serde::Deserialize;

/// Largest accepted canvas side, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

pub const DEFAULT_BACKGROUND: &str = "green";
pub const DEFAULT_STROKE_WIDTH: f32 = 10.0;

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_stroke_color() -> String {
    "#ffffff".to_string()
}

fn default_stroke_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

/// Check that both sides are within `1..=MAX_DIMENSION`.
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    let ok = |v: u32| (1..=MAX_DIMENSION).contains(&v);
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(InpaintError::InvalidDimensions {
            width,
            height,
            max: MAX_DIMENSION,
        })
    }
}

/// Parse a color string, falling back to `fallback` with a warning.
fn color_or(value: &str, fallback: Color) -> Color {
    Color::parse(value).unwrap_or_else(|| {
        log::warn!("unrecognized color {value:?}, using fallback");
        fallback
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasConfig {
    /// DOM id of the host element. Carried for the browser bridge only.
    #[serde(default)]
    pub id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background_color: String,
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: String::new(),
            width,
            height,
            background_color: default_background(),
        }
    }

    pub fn with_background(mut self, color: &str) -> Self {
        self.background_color = color.to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)
    }

    pub fn background(&self) -> Color {
        color_or(&self.background_color, Color::rgba(0.0, 128.0 / 255.0, 0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskConfig {
    #[serde(default)]
    pub id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

impl MaskConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: String::new(),
            width,
            height,
            stroke_color: default_stroke_color(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)
    }

    pub fn stroke(&self) -> Color {
        color_or(&self.stroke_color, Color::WHITE)
    }
}
