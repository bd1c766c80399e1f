//! The layer/mask editing facade.
//!
//! `Inpainter` owns the image canvas, the mask surface, the viewport, and
//! the tools. It starts uninitialized; each surface is created explicitly
//! and both are dropped by `destroy()`. Every operation against a missing
//! surface is a no-op that returns the empty sentinel (`None`, `false`,
//! or `""`). Errors are logged here and never propagated to the caller.

use crate::canvas::ImageCanvas;
use crate::input::InputEvent;
use crate::tools::{BrushTool, EditAction, SelectTool, Tool};
use ic_core::dataurl::{self, Blob};
use ic_core::{
    CanvasConfig, Color, DrawMode, LayerId, LayerInfo, MaskConfig, MaskSurface, RgbaImage,
    Viewport, ZoomDirection, threshold_mask,
};

/// Which surface an export reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The composited image canvas.
    Image,
    /// The thresholded black/white mask.
    Mask,
}

impl ExportKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(Self::Image),
            "mask" => Some(Self::Mask),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Inpainter {
    canvas: Option<ImageCanvas>,
    mask: Option<MaskSurface>,
    viewport: Viewport,
    select_tool: SelectTool,
    brush_tool: BrushTool,
}

impl Inpainter {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Create (or replace) the image canvas. An invalid config is logged
    /// and leaves any existing canvas in place.
    pub fn create_image_canvas(&mut self, config: CanvasConfig) -> Option<&ImageCanvas> {
        match ImageCanvas::new(config) {
            Ok(canvas) => {
                if self.canvas.is_some() {
                    log::debug!("replacing existing image canvas");
                }
                log::debug!("image canvas {}x{}", canvas.width(), canvas.height());
                self.canvas = Some(canvas);
                self.canvas.as_ref()
            }
            Err(e) => {
                log::error!("failed to create image canvas: {e}");
                None
            }
        }
    }

    /// Create the mask surface. A second call returns the existing surface
    /// unchanged, whatever config it is given.
    pub fn create_mask_surface(&mut self, config: MaskConfig) -> Option<&MaskSurface> {
        if self.mask.is_none() {
            match MaskSurface::from_config(&config) {
                Ok(mask) => {
                    log::debug!("mask surface {}x{}", mask.width(), mask.height());
                    self.mask = Some(mask);
                }
                Err(e) => {
                    log::error!("failed to create mask surface: {e}");
                    return None;
                }
            }
        }
        self.mask.as_ref()
    }

    /// Drop both surfaces and reset the viewport and tools.
    pub fn destroy(&mut self) {
        *self = Self::default();
        log::debug!("inpainter torn down");
    }

    pub fn image_canvas(&self) -> Option<&ImageCanvas> {
        self.canvas.as_ref()
    }

    pub fn mask_surface(&self) -> Option<&MaskSurface> {
        self.mask.as_ref()
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// Decode a data-URL image and append it as the top layer at (0, 0).
    pub fn add_image_layer(&mut self, src: &str) -> Option<LayerId> {
        let canvas = self.canvas.as_mut()?;
        canvas
            .add_data_url(src)
            .inspect_err(|e| log::error!("could not add image layer: {e}"))
            .ok()
    }

    /// Same as `add_image_layer`, from raw encoded bytes.
    pub fn add_image_bytes(&mut self, bytes: &[u8]) -> Option<LayerId> {
        let canvas = self.canvas.as_mut()?;
        canvas
            .add_encoded(bytes)
            .inspect_err(|e| log::error!("could not add image layer: {e}"))
            .ok()
    }

    pub fn layers(&self) -> Vec<LayerInfo> {
        self.canvas
            .as_ref()
            .map(|c| c.stack.infos())
            .unwrap_or_default()
    }

    pub fn selected(&self) -> Option<LayerId> {
        self.canvas.as_ref().and_then(|c| c.stack.selected())
    }

    pub fn select_layer(&mut self, id: LayerId) -> bool {
        self.canvas.as_mut().is_some_and(|c| c.stack.select(id))
    }

    pub fn clear_selection(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.stack.clear_selection();
        }
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.reorder_selected("bring to front", |stack, id| stack.bring_to_front(id))
    }

    pub fn bring_forward(&mut self) -> bool {
        self.reorder_selected("bring forward", |stack, id| stack.bring_forward(id))
    }

    pub fn send_to_back(&mut self) -> bool {
        self.reorder_selected("send to back", |stack, id| stack.send_to_back(id))
    }

    pub fn send_backward(&mut self) -> bool {
        self.reorder_selected("send backward", |stack, id| stack.send_backward(id))
    }

    /// Remove the selected layer. No-op without a selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let Some(id) = canvas.stack.selected() else {
            return false;
        };
        let removed = canvas.stack.remove(id).is_some();
        if removed {
            log::debug!("deleted layer {id}");
        }
        removed
    }

    fn reorder_selected(
        &mut self,
        what: &str,
        op: impl FnOnce(&mut ic_core::LayerStack, LayerId) -> bool,
    ) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let Some(id) = canvas.stack.selected() else {
            return false;
        };
        let changed = op(&mut canvas.stack, id);
        if changed {
            log::debug!("{what}: {id} now at {:?}", canvas.stack.position(id));
        }
        changed
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down on the image canvas at a screen position. Selects the
    /// topmost layer under the pointer, or clears the selection.
    /// Returns true if the selection changed.
    pub fn image_pointer_down(&mut self, sx: f64, sy: f64) -> bool {
        let Some(canvas) = self.canvas.as_ref() else {
            return false;
        };
        let p = self.viewport.screen_to_canvas(sx, sy);
        let before = canvas.stack.selected();
        let hit = ic_render::hit_test(&canvas.stack, p.x, p.y);
        let actions = self
            .select_tool
            .handle(&InputEvent::PointerDown { x: p.x, y: p.y }, hit);
        self.apply_actions(actions);
        self.selected() != before
    }

    pub fn mask_pointer_down(&mut self, sx: f64, sy: f64) -> bool {
        let p = self.viewport.screen_to_canvas(sx, sy);
        self.handle_mask_event(InputEvent::PointerDown { x: p.x, y: p.y })
    }

    pub fn mask_pointer_move(&mut self, sx: f64, sy: f64) -> bool {
        let p = self.viewport.screen_to_canvas(sx, sy);
        self.handle_mask_event(InputEvent::PointerMove { x: p.x, y: p.y })
    }

    pub fn mask_pointer_up(&mut self, sx: f64, sy: f64) -> bool {
        let p = self.viewport.screen_to_canvas(sx, sy);
        self.handle_mask_event(InputEvent::PointerUp { x: p.x, y: p.y })
    }

    pub fn mask_pointer_leave(&mut self) -> bool {
        self.handle_mask_event(InputEvent::PointerLeave)
    }

    /// Returns true if mask pixels changed.
    fn handle_mask_event(&mut self, event: InputEvent) -> bool {
        if self.mask.is_none() {
            return false;
        }
        let actions = self.brush_tool.handle(&event, None);
        self.apply_actions(actions)
    }

    /// Apply tool output. Returns true if any pixels were painted.
    fn apply_actions(&mut self, actions: Vec<EditAction>) -> bool {
        let mut painted = false;
        for action in actions {
            match action {
                EditAction::Select(id) => {
                    self.select_layer(id);
                }
                EditAction::ClearSelection => self.clear_selection(),
                EditAction::BeginStroke { x, y } => {
                    if let Some(mask) = self.mask.as_mut() {
                        mask.begin_stroke(x, y);
                    }
                }
                EditAction::StrokeTo { x, y } => {
                    if let Some(mask) = self.mask.as_mut() {
                        painted |= mask.continue_stroke(x, y);
                    }
                }
                EditAction::EndStroke => {
                    if let Some(mask) = self.mask.as_mut() {
                        mask.end_stroke();
                    }
                }
            }
        }
        painted
    }

    // ─── Brush settings ──────────────────────────────────────────────────

    pub fn set_drawing_mode(&mut self, mode: DrawMode) {
        if let Some(mask) = self.mask.as_mut() {
            mask.set_mode(mode);
            log::debug!("drawing mode: {}", mode.name());
        }
    }

    /// Set the drawing mode by name (`brush`, `erase`). Unknown names are
    /// ignored and return false.
    pub fn set_drawing_mode_name(&mut self, name: &str) -> bool {
        match DrawMode::from_name(name) {
            Some(mode) if self.mask.is_some() => {
                self.set_drawing_mode(mode);
                true
            }
            Some(_) => false,
            None => {
                log::warn!("unknown drawing mode {name:?}");
                false
            }
        }
    }

    pub fn set_stroke_width(&mut self, px: f32) -> bool {
        self.mask.as_mut().is_some_and(|m| m.set_stroke_width(px))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> bool {
        let Some(mask) = self.mask.as_mut() else {
            return false;
        };
        mask.set_stroke_color(color);
        true
    }

    pub fn clear_mask(&mut self) -> bool {
        let Some(mask) = self.mask.as_mut() else {
            return false;
        };
        mask.clear();
        true
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn control_zoom(&mut self, direction: ZoomDirection) -> f64 {
        let zoom = self.viewport.step(direction);
        log::debug!("zoom {zoom:.3}");
        zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.viewport.set_zoom(zoom)
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Raster snapshot of the composited layer stack.
    pub fn export_composite(&self) -> Option<RgbaImage> {
        self.canvas.as_ref().map(ImageCanvas::render)
    }

    /// The mask surface binarized to opaque black/white.
    pub fn export_mask(&self) -> Option<RgbaImage> {
        self.mask.as_ref().map(|m| threshold_mask(m.pixels()))
    }

    pub fn export(&self, kind: ExportKind) -> Option<RgbaImage> {
        match kind {
            ExportKind::Image => self.export_composite(),
            ExportKind::Mask => self.export_mask(),
        }
    }

    /// PNG data URL of the requested surface, or `""` when the surface
    /// does not exist or encoding fails.
    pub fn export_data_url(&self, kind: ExportKind) -> String {
        self.export_blob(kind)
            .map(|blob| blob.to_data_url())
            .unwrap_or_default()
    }

    /// Like `export_data_url`, with the kind given by name (`image`,
    /// `mask`). Unknown names yield `""`.
    pub fn canvas_to_data_url(&self, kind: &str) -> String {
        ExportKind::from_name(kind)
            .map(|k| self.export_data_url(k))
            .unwrap_or_default()
    }

    pub fn export_blob(&self, kind: ExportKind) -> Option<Blob> {
        let img = self.export(kind)?;
        dataurl::encode_png_blob(&img)
            .inspect_err(|e| log::error!("could not encode {kind:?} export: {e}"))
            .ok()
    }

    pub fn image_canvas_to_blob(&self) -> Option<Blob> {
        self.export_blob(ExportKind::Image)
    }

    pub fn mask_to_blob(&self) -> Option<Blob> {
        self.export_blob(ExportKind::Mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_facade_is_inert() {
        let mut ip = Inpainter::new();
        assert_eq!(ip.canvas_to_data_url("image"), "");
        assert_eq!(ip.canvas_to_data_url("mask"), "");
        assert!(ip.add_image_layer("data:image/png;base64,AAAA").is_none());
        assert!(!ip.bring_to_front());
        assert!(!ip.delete_selected());
        assert!(!ip.mask_pointer_down(1.0, 1.0));
        assert!(!ip.set_stroke_width(5.0));
        assert!(ip.image_canvas_to_blob().is_none());
        assert!(ip.layers().is_empty());
    }

    #[test]
    fn invalid_canvas_config_yields_none() {
        let mut ip = Inpainter::new();
        assert!(ip.create_image_canvas(CanvasConfig::new(0, 100)).is_none());
        assert!(ip.image_canvas().is_none());
        assert!(ip.create_mask_surface(MaskConfig::new(100, 0)).is_none());
    }

    #[test]
    fn unknown_export_kind_is_empty() {
        let mut ip = Inpainter::new();
        ip.create_image_canvas(CanvasConfig::new(4, 4));
        assert_eq!(ip.canvas_to_data_url("thumbnail"), "");
        assert!(ip.canvas_to_data_url("image").starts_with("data:image/png;base64,"));
    }

    #[test]
    fn destroy_returns_to_uninitialized() {
        let mut ip = Inpainter::new();
        ip.create_image_canvas(CanvasConfig::new(4, 4));
        ip.create_mask_surface(MaskConfig::new(4, 4));
        ip.set_zoom(3.0);
        ip.destroy();
        assert!(ip.image_canvas().is_none());
        assert!(ip.mask_surface().is_none());
        assert_eq!(ip.viewport().zoom(), 1.0);
        assert_eq!(ip.canvas_to_data_url("image"), "");
    }
}
