//! Hit testing: point → layer lookup.
//!
//! Walks the stack top to bottom and returns the first layer whose
//! bounding box contains the canvas-space point. Transparent pixels inside
//! the box still count as hits.

use ic_core::{LayerId, LayerStack};

/// Find the topmost layer at canvas position (x, y).
/// Returns `None` if the point is over bare background.
pub fn hit_test(stack: &LayerStack, x: f64, y: f64) -> Option<LayerId> {
    stack
        .iter()
        .rev()
        .find(|layer| layer.contains(x, y))
        .map(|layer| layer.id)
}
