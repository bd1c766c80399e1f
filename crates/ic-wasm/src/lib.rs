//! WASM bridge for Inpaint Canvas: exposes the layer/mask engine to
//! JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns one
//! `InpaintCanvas`; buttons and pointer listeners call straight into it.
//! Failures never throw: they are logged to the console and surface as
//! `false`, `""`, or `undefined`.

mod render2d;

use ic_core::{CanvasConfig, Color, LayerId, MaskConfig, ZoomDirection};
use ic_editor::Inpainter;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The main WASM-facing controller.
///
/// Holds the editing facade plus the 2D contexts of the two host canvases.
#[wasm_bindgen]
pub struct InpaintCanvas {
    inner: Inpainter,
    image_ctx: Option<CanvasRenderingContext2d>,
    mask_ctx: Option<CanvasRenderingContext2d>,
}

/// Current brush settings, for syncing toolbar widgets.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrushState {
    mode: &'static str,
    stroke_width: f32,
    stroke_color: String,
    zoom: f64,
}

impl Default for InpaintCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl InpaintCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        init_logging(log::Level::Info);
        Self {
            inner: Inpainter::new(),
            image_ctx: None,
            mask_ctx: None,
        }
    }

    /// Enable debug-level console logging.
    pub fn set_debug_logging(&self, enabled: bool) {
        init_logging(if enabled {
            log::Level::Debug
        } else {
            log::Level::Info
        });
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Create the image canvas from a JSON config
    /// (`{"id":"app","width":900,"height":700,"backgroundColor":"skyblue"}`)
    /// and bind it to the `<canvas>` with that id. Returns `false` on any
    /// failure, leaving the image canvas uninitialized.
    pub fn create_image_canvas(&mut self, config_json: &str) -> bool {
        let config: CanvasConfig = match serde_json::from_str(config_json) {
            Ok(c) => c,
            Err(e) => {
                log::error!("invalid image canvas config: {e}");
                return false;
            }
        };
        let element = match find_canvas(&format!("#{}", config.id)) {
            Ok(el) => el,
            Err(e) => {
                log::error!("image canvas element {:?} unavailable: {e:?}", config.id);
                return false;
            }
        };
        if self.inner.create_image_canvas(config).is_none() {
            return false;
        }
        self.image_ctx = render2d::context_2d(&element)
            .inspect_err(|e| log::error!("image canvas context: {e:?}"))
            .ok();
        self.render();
        self.image_ctx.is_some()
    }

    /// Create the mask surface over the `<canvas>` matched by `selector`,
    /// sized to that element. Idempotent: later calls keep the surface.
    pub fn create_mask_surface(&mut self, selector: &str) -> bool {
        if self.inner.mask_surface().is_some() {
            return true;
        }
        let element = match find_canvas(selector) {
            Ok(el) => el,
            Err(e) => {
                log::error!("mask canvas {selector:?} unavailable: {e:?}");
                return false;
            }
        };
        let mut config = MaskConfig::new(element.width(), element.height());
        config.id = selector.to_string();
        if self.inner.create_mask_surface(config).is_none() {
            return false;
        }
        self.mask_ctx = render2d::context_2d(&element)
            .inspect_err(|e| log::error!("mask canvas context: {e:?}"))
            .ok();
        self.render();
        self.mask_ctx.is_some()
    }

    /// Drop both surfaces. The host canvases are left as drawn.
    pub fn destroy(&mut self) {
        self.inner.destroy();
        self.image_ctx = None;
        self.mask_ctx = None;
    }

    /// Redraw both surfaces. The mask shows its raw strokes, not the
    /// thresholded export.
    pub fn render(&self) {
        if let (Some(ctx), Some(img)) = (&self.image_ctx, self.inner.export_composite()) {
            if let Err(e) = render2d::present(ctx, &img, self.inner.viewport()) {
                log::error!("failed to draw image canvas: {e:?}");
            }
        }
        if let (Some(ctx), Some(mask)) = (&self.mask_ctx, self.inner.mask_surface()) {
            if let Err(e) = render2d::present(ctx, mask.pixels(), self.inner.viewport()) {
                log::error!("failed to draw mask surface: {e:?}");
            }
        }
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// Add an image from a data URL (e.g. `FileReader.readAsDataURL`).
    /// Returns the new layer id, or `""` if it could not be decoded.
    pub fn add_image_layer(&mut self, src: &str) -> String {
        let id = self.inner.add_image_layer(src);
        self.after_layer_change(id)
    }

    /// Add an image from encoded bytes (e.g. `file.arrayBuffer()`).
    pub fn add_image_bytes(&mut self, bytes: &[u8]) -> String {
        let id = self.inner.add_image_bytes(bytes);
        self.after_layer_change(id)
    }

    pub fn bring_to_front(&mut self) -> bool {
        let changed = self.inner.bring_to_front();
        self.render_if(changed)
    }

    pub fn bring_forward(&mut self) -> bool {
        let changed = self.inner.bring_forward();
        self.render_if(changed)
    }

    pub fn send_to_back(&mut self) -> bool {
        let changed = self.inner.send_to_back();
        self.render_if(changed)
    }

    pub fn send_backward(&mut self) -> bool {
        let changed = self.inner.send_backward();
        self.render_if(changed)
    }

    pub fn delete_selected(&mut self) -> bool {
        let changed = self.inner.delete_selected();
        self.render_if(changed)
    }

    /// Select a layer by id. Unknown ids return `false`.
    pub fn select_layer(&mut self, layer_id: &str) -> bool {
        LayerId::parse(layer_id).is_some_and(|id| self.inner.select_layer(id))
    }

    /// Id of the selected layer, or `""`.
    pub fn get_selected_id(&self) -> String {
        self.inner
            .selected()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Layers bottom → top as a JSON array of
    /// `{id, width, height, left, top, zIndex, selected}`.
    pub fn layers_json(&self) -> String {
        serde_json::to_string(&self.inner.layers()).unwrap_or_else(|e| {
            log::error!("could not serialize layers: {e}");
            "[]".to_string()
        })
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down on the image canvas (offset coordinates). Returns true
    /// if the selection changed.
    pub fn handle_image_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.image_pointer_down(x, y)
    }

    pub fn handle_mask_pointer_down(&mut self, x: f64, y: f64) -> bool {
        let changed = self.inner.mask_pointer_down(x, y);
        self.render_if(changed)
    }

    pub fn handle_mask_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let changed = self.inner.mask_pointer_move(x, y);
        self.render_if(changed)
    }

    pub fn handle_mask_pointer_up(&mut self, x: f64, y: f64) -> bool {
        let changed = self.inner.mask_pointer_up(x, y);
        self.render_if(changed)
    }

    /// `pointerout` on the mask canvas ends the stroke.
    pub fn handle_mask_pointer_leave(&mut self) -> bool {
        let changed = self.inner.mask_pointer_leave();
        self.render_if(changed)
    }

    // ─── Brush ───────────────────────────────────────────────────────────

    /// `"brush"` or `"erase"`.
    pub fn set_drawing_mode(&mut self, mode: &str) -> bool {
        self.inner.set_drawing_mode_name(mode)
    }

    pub fn set_stroke_width(&mut self, px: f32) -> bool {
        self.inner.set_stroke_width(px)
    }

    /// Accepts hex (`#fff`, `#ffffffff`) or a basic CSS color name.
    pub fn set_stroke_color(&mut self, color: &str) -> bool {
        match Color::parse(color) {
            Some(c) => self.inner.set_stroke_color(c),
            None => {
                log::warn!("unrecognized stroke color {color:?}");
                false
            }
        }
    }

    pub fn clear_mask(&mut self) -> bool {
        let changed = self.inner.clear_mask();
        self.render_if(changed)
    }

    /// Brush settings as JSON:
    /// `{"mode":"brush","strokeWidth":10,"strokeColor":"#FFFFFF","zoom":1}`.
    pub fn get_brush_json(&self) -> String {
        let Some(mask) = self.inner.mask_surface() else {
            return "{}".to_string();
        };
        let state = BrushState {
            mode: mask.mode().name(),
            stroke_width: mask.stroke_width(),
            stroke_color: mask.stroke_color().to_hex(),
            zoom: self.inner.viewport().zoom(),
        };
        serde_json::to_string(&state).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    /// Step the zoom with `"+"` or `"-"`. Returns the new zoom factor.
    pub fn control_zoom(&mut self, direction: &str) -> f64 {
        match ZoomDirection::from_symbol(direction) {
            Some(dir) => {
                let zoom = self.inner.control_zoom(dir);
                self.render();
                zoom
            }
            None => {
                log::warn!("unknown zoom direction {direction:?}");
                self.inner.viewport().zoom()
            }
        }
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// PNG data URL of `"image"` or `"mask"`; `""` when unavailable.
    pub fn canvas_to_data_url(&self, kind: &str) -> String {
        self.inner.canvas_to_data_url(kind)
    }

    /// Composited image as a `Blob`, or `undefined`.
    pub fn image_canvas_to_blob(&self) -> Option<web_sys::Blob> {
        self.inner.image_canvas_to_blob().and_then(|b| to_js_blob(&b))
    }

    /// Thresholded mask as a `Blob`, or `undefined`.
    pub fn mask_to_blob(&self) -> Option<web_sys::Blob> {
        self.inner.mask_to_blob().and_then(|b| to_js_blob(&b))
    }
}

impl InpaintCanvas {
    fn after_layer_change(&mut self, id: Option<LayerId>) -> String {
        match id {
            Some(id) => {
                self.render();
                id.to_string()
            }
            None => String::new(),
        }
    }

    fn render_if(&self, changed: bool) -> bool {
        if changed {
            self.render();
        }
        changed
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Convert a data URL into a `Blob` with the URL's MIME type.
/// Returns `undefined` for malformed input.
#[wasm_bindgen]
pub fn data_url_to_blob(url: &str) -> Option<web_sys::Blob> {
    match ic_core::data_url_to_blob(url) {
        Ok(blob) => to_js_blob(&blob),
        Err(e) => {
            log::warn!("data URL rejected: {e}");
            None
        }
    }
}

/// Install the console logger. Later calls only adjust the level.
fn init_logging(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

fn to_js_blob(blob: &ic_core::Blob) -> Option<web_sys::Blob> {
    let bytes = js_sys::Uint8Array::from(blob.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&blob.mime);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .inspect_err(|e| log::error!("Blob construction failed: {e:?}"))
        .ok()
}

fn find_canvas(selector: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str("no element matches selector"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("element is not a <canvas>"))
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Inpaint WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
