//! Canvas2D presentation.
//!
//! Pushes an RGBA raster to an HTML `<canvas>` with `putImageData` at 1:1.
//! Zoom is applied through the element's CSS size only; the backing store
//! keeps canvas resolution.

use ic_core::{RgbaImage, Viewport};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Fetch the 2D context of a canvas element.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("context is not CanvasRenderingContext2d"))
}

/// Draw `raster` into `ctx`, displayed at the viewport zoom.
pub fn present(
    ctx: &CanvasRenderingContext2d,
    raster: &RgbaImage,
    viewport: &Viewport,
) -> Result<(), JsValue> {
    let p = ic_render::presentation(raster.width(), raster.height(), viewport);

    if let Some(canvas) = ctx.canvas() {
        if canvas.width() != p.width || canvas.height() != p.height {
            canvas.set_width(p.width);
            canvas.set_height(p.height);
        }
        let style = canvas.style();
        style.set_property("width", &format!("{}px", p.display_width))?;
        style.set_property("height", &format!("{}px", p.display_height))?;
        // Keep zoomed-in pixels crisp
        style.set_property("image-rendering", "pixelated")?;
    }

    let data =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(raster.as_raw().as_slice()), p.width, p.height)?;
    ctx.put_image_data(&data, 0.0, 0.0)
}
