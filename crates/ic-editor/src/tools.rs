//! Tool system for canvas interactions.
//!
//! Each tool translates input events into `EditAction`s that the
//! `Inpainter` applies to the layer stack or the mask surface.
//!
//! | Tool   | Surface      | Down                 | Move (pressed) | Up / Leave  |
//! |--------|--------------|----------------------|----------------|-------------|
//! | Select | image canvas | select hit / clear   | -              | -           |
//! | Brush  | mask surface | begin stroke         | stroke to      | end stroke  |

use crate::input::InputEvent;
use ic_core::LayerId;

/// A state change requested by a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditAction {
    Select(LayerId),
    ClearSelection,
    BeginStroke { x: f64, y: f64 },
    StrokeTo { x: f64, y: f64 },
    EndStroke,
}

/// Trait for tools that handle input and produce edit actions.
pub trait Tool {
    /// Handle an input event. `hit_layer` is the topmost layer under the
    /// pointer, when the event has a position and hit testing applies.
    fn handle(&mut self, event: &InputEvent, hit_layer: Option<LayerId>) -> Vec<EditAction>;
}

// ─── Select Tool ─────────────────────────────────────────────────────────

/// Click-to-select on the image canvas. Layers are never dragged.
#[derive(Debug, Default)]
pub struct SelectTool;

impl SelectTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for SelectTool {
    fn handle(&mut self, event: &InputEvent, hit_layer: Option<LayerId>) -> Vec<EditAction> {
        match event {
            InputEvent::PointerDown { .. } => match hit_layer {
                Some(id) => vec![EditAction::Select(id)],
                None => vec![EditAction::ClearSelection],
            },
            _ => vec![],
        }
    }
}

// ─── Brush Tool ──────────────────────────────────────────────────────────

/// Freehand stroke tracking for the mask surface. Brush and eraser share
/// this tool; the surface's draw mode decides how pixels combine.
#[derive(Debug, Default)]
pub struct BrushTool {
    pressed: bool,
}

impl BrushTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.pressed
    }
}

impl Tool for BrushTool {
    fn handle(&mut self, event: &InputEvent, _hit_layer: Option<LayerId>) -> Vec<EditAction> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.pressed = true;
                vec![EditAction::BeginStroke { x, y }]
            }
            InputEvent::PointerMove { x, y } if self.pressed => {
                vec![EditAction::StrokeTo { x, y }]
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave if self.pressed => {
                self.pressed = false;
                vec![EditAction::EndStroke]
            }
            _ => vec![],
        }
    }
}
