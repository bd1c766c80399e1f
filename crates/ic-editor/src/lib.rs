pub mod canvas;
pub mod inpainter;
pub mod input;
pub mod tools;

pub use canvas::ImageCanvas;
pub use inpainter::{ExportKind, Inpainter};
