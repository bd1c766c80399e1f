//! CPU compositing of the layer stack.
//!
//! Fills the canvas with the background color, then blends each layer
//! source-over from bottom to top at its offset, clipped to the canvas.

use ic_core::{LayerStack, Rgba, RgbaImage, Viewport};
use image::imageops;

/// Flatten the stack into a single `width × height` raster.
pub fn composite(stack: &LayerStack, width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(width, height, background);
    for layer in stack.iter() {
        imageops::overlay(&mut out, &layer.pixels, layer.left, layer.top);
    }
    log::trace!("composited {} layers at {width}x{height}", stack.len());
    out
}

/// How a canvas raster is shown on screen.
///
/// The backing store always keeps the raster's own resolution; zoom only
/// changes the displayed (CSS) size, so no pixels are reallocated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub width: u32,
    pub height: u32,
    pub display_width: f64,
    pub display_height: f64,
}

pub fn presentation(width: u32, height: u32, viewport: &Viewport) -> Presentation {
    let (display_width, display_height) = viewport.screen_size(width, height);
    Presentation {
        width,
        height,
        display_width,
        display_height,
    }
}
