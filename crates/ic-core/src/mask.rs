//! Freehand mask surface.
//!
//! A raw RGBA buffer painted by pointer-driven polyline strokes. Each
//! pointer move draws one segment from the previous point with round caps,
//! which also gives round joins where consecutive segments meet. There is
//! no smoothing, batching, or pressure response.

use crate::config::MaskConfig;
use crate::error::Result;
use crate::model::Color;
use image::{Rgba, RgbaImage};
use kurbo::{Line, ParamCurveNearest, Point, Rect};

pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 500.0;

/// How a stroke combines with the pixels already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Paint over (source-over).
    #[default]
    Brush,
    /// Cut out (destination-out).
    Erase,
}

impl DrawMode {
    /// Parse the mode names used by the browser UI.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "brush" | "draw" | "source-over" => Some(Self::Brush),
            "erase" | "eraser" | "destination-out" => Some(Self::Erase),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Erase => "erase",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaskSurface {
    pixels: RgbaImage,
    stroke_color: Color,
    stroke_width: f32,
    mode: DrawMode,
    /// Last point of the active stroke; `None` between strokes.
    cursor: Option<Point>,
}

impl MaskSurface {
    /// A transparent surface with a white brush of the default width.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_config(&MaskConfig::new(width, height))
    }

    pub fn from_config(config: &MaskConfig) -> Result<Self> {
        config.validate()?;
        let mut surface = Self {
            pixels: RgbaImage::new(config.width, config.height),
            stroke_color: config.stroke(),
            stroke_width: crate::config::DEFAULT_STROKE_WIDTH,
            mode: DrawMode::Brush,
            cursor: None,
        };
        surface.set_stroke_width(config.stroke_width);
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Set the brush diameter in pixels, clamped to
    /// `[MIN_STROKE_WIDTH, MAX_STROKE_WIDTH]`. Non-finite values are
    /// rejected and leave the width unchanged.
    pub fn set_stroke_width(&mut self, width: f32) -> bool {
        if !width.is_finite() {
            log::warn!("ignoring non-finite stroke width {width}");
            return false;
        }
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        true
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    pub fn is_stroking(&self) -> bool {
        self.cursor.is_some()
    }

    /// Start a stroke. Nothing is painted until the pointer moves.
    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.cursor = Some(Point::new(x, y));
    }

    /// Extend the active stroke to `(x, y)`. Returns false when no stroke
    /// is active.
    pub fn continue_stroke(&mut self, x: f64, y: f64) -> bool {
        let Some(last) = self.cursor else {
            return false;
        };
        let next = Point::new(x, y);
        self.draw_segment(last, next);
        self.cursor = Some(next);
        true
    }

    pub fn end_stroke(&mut self) {
        self.cursor = None;
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        self.cursor = None;
    }

    /// Stamp one round-capped segment using the current width, color and mode.
    ///
    /// Pixels whose center is within `width / 2` of the segment are fully
    /// covered; coverage then falls off linearly over one more pixel.
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let radius = f64::from(self.stroke_width) / 2.0;
        let line = Line::new(from, to);
        let area = Rect::from_points(from, to).inflate(radius + 1.0, radius + 1.0);

        let (w, h) = self.pixels.dimensions();
        let x0 = area.x0.floor().max(0.0) as u32;
        let y0 = area.y0.floor().max(0.0) as u32;
        let x1 = area.x1.ceil().clamp(0.0, f64::from(w)) as u32;
        let y1 = area.y1.ceil().clamp(0.0, f64::from(h)) as u32;

        let src = self.stroke_color.to_rgba8();
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let dist = line.nearest(center, 1e-9).distance_sq.sqrt();
                let coverage = (radius + 1.0 - dist).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let px = self.pixels.get_pixel_mut(x, y);
                match self.mode {
                    DrawMode::Brush => source_over(px, src, coverage),
                    DrawMode::Erase => destination_out(px, coverage),
                }
            }
        }
    }
}

/// Non-premultiplied source-over blend of `src` scaled by `coverage`.
fn source_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f64) {
    let sa = f64::from(src.0[3]) / 255.0 * coverage;
    let da = f64::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let v = (f64::from(src.0[c]) * sa + f64::from(dst.0[c]) * da * (1.0 - sa)) / out_a;
        dst.0[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

/// Destination-out: reduce alpha by `coverage`. A fully cleared pixel reads
/// back as transparent black, as it would from a premultiplied canvas.
fn destination_out(dst: &mut Rgba<u8>, coverage: f64) {
    let out_a = f64::from(dst.0[3]) / 255.0 * (1.0 - coverage);
    let a = (out_a * 255.0).round() as u8;
    if a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
    } else {
        dst.0[3] = a;
    }
}
